//! Route table and shared handler state.

use crate::domain::GatewayConfig;
use crate::middleware::{track_requests, GatewayMetrics};
use crate::rest::{moderators, orders};
use crate::ws::WebSocketHandler;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use bz_02_order_gateway::OrderGatewayApi;
use bz_03_moderator_discovery::ModeratorDiscoveryApi;
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderGatewayApi>,
    pub moderators: Arc<dyn ModeratorDiscoveryApi>,
    pub bus: Arc<InMemoryEventBus>,
    pub metrics: Arc<GatewayMetrics>,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderGatewayApi>,
        moderators: Arc<dyn ModeratorDiscoveryApi>,
        bus: Arc<InMemoryEventBus>,
    ) -> Self {
        Self {
            orders,
            moderators,
            bus,
            metrics: Arc::new(GatewayMetrics::new()),
        }
    }
}

/// Build the full HTTP router.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    let ob = Router::new()
        .route("/orderconfirmation", post(orders::confirm_order))
        .route("/ordercancel", post(orders::cancel_order))
        .route("/orderfulfillment", post(orders::fulfill_order))
        .route("/ordercompletion", post(orders::complete_order))
        .route("/opendispute", post(orders::open_dispute))
        .route("/closedispute", post(orders::close_dispute))
        .route("/releasefunds", post(orders::release_funds))
        .route("/refund", post(orders::refund_order))
        .route("/order/:order_id", get(orders::get_order))
        .route("/case/:order_id", get(orders::get_case))
        .route("/moderators", get(moderators::get_moderators))
        .route(
            "/moderator",
            put(moderators::register_moderator)
                .delete(moderators::unregister_moderator),
        );

    Router::new()
        .nest("/ob", ob)
        .route("/ws", get(websocket))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(layers)
        .with_state(state)
}

async fn websocket(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        WebSocketHandler::new(state.bus, state.metrics)
            .handle(socket)
            .await;
    })
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "api-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}
