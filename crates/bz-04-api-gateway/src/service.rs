//! API gateway service - binds the router to a socket.

use crate::domain::{ConfigError, GatewayConfig};
use crate::middleware::GatewayMetrics;
use crate::router::{build_router, AppState};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Errors raised while serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// API gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API gateway service
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.state.metrics)
    }

    pub fn router(&self) -> Router {
        build_router(&self.config, self.state.clone())
    }

    /// Serve until `shutdown` resolves.
    ///
    /// Returns immediately when the API is disabled.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.config.enabled {
            info!("API gateway disabled");
            return Ok(());
        }

        let addr = self.config.addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::Bind { addr, source })?;
        info!(addr = %addr, "API gateway listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API gateway stopped");
        Ok(())
    }
}
