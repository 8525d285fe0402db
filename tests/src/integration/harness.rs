//! Test node: container, router and a metrics observer.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use bazaar_telemetry::BazaarMetrics;
use bz_04_api_gateway::build_router;
use http_body_util::BodyExt;
use node_runtime::handlers::MetricsObserver;
use node_runtime::{NodeConfig, NodeContainer};
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

pub struct TestNode {
    pub container: NodeContainer,
    pub metrics: BazaarMetrics,
    router: Router,
    shutdown: watch::Sender<bool>,
}

impl TestNode {
    /// Boot a node with default configuration and a running metrics observer.
    pub fn start() -> Self {
        Self::with_config(NodeConfig::default())
    }

    pub fn with_config(config: NodeConfig) -> Self {
        let metrics = BazaarMetrics::new().unwrap();
        let container = NodeContainer::new(config, metrics.clone());
        let router = build_router(&container.config.api, container.api_state());

        let (shutdown, rx) = watch::channel(false);
        let observer = MetricsObserver::new(
            container.event_bus.subscribe(MetricsObserver::filter()),
            metrics.clone(),
        );
        tokio::spawn(observer.run(rx));

        Self {
            container,
            metrics,
            router,
            shutdown,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    /// Let the observer drain what has been published so far.
    pub async fn settle(&self) {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}

impl Drop for TestNode {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}
