//! # Bazaar Node Runtime
//!
//! Entry point of the marketplace node.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file named by `BZ_CONFIG`, then env overrides)
//! 2. Initialize logging and register Prometheus counters
//! 3. Build the subsystem container
//! 4. Start the bus metrics observer
//! 5. Serve the HTTP API until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{error, info};

use bazaar_telemetry::init_telemetry;
use bz_04_api_gateway::ApiGatewayService;
use node_runtime::handlers::MetricsObserver;
use node_runtime::{NodeConfig, NodeContainer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("Failed to load node configuration")?;

    let telemetry = config.telemetry_config(|key| std::env::var(key).ok());
    let metrics = init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Bazaar Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container = Arc::new(NodeContainer::new(config, metrics.clone()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let observer = MetricsObserver::new(
        container.event_bus.subscribe(MetricsObserver::filter()),
        metrics,
    );
    let observer_handle = tokio::spawn(observer.run(shutdown_rx.clone()));

    let api = ApiGatewayService::new(container.config.api.clone(), container.api_state())
        .context("Invalid API configuration")?;
    let api_enabled = api.config().enabled;
    info!(addr = %api.config().addr(), api_enabled, "Node is running. Press Ctrl+C to stop.");

    let mut api_shutdown = shutdown_rx;
    let served = api.serve(async move {
        let _ = api_shutdown.changed().await;
    });

    tokio::pin!(served);
    tokio::select! {
        result = &mut served => {
            match result {
                Err(e) => error!(error = %e, "API gateway failed"),
                Ok(()) if !api_enabled => {
                    tokio::signal::ctrl_c()
                        .await
                        .context("Failed to listen for Ctrl+C")?;
                    info!("Initiating graceful shutdown...");
                }
                Ok(()) => {}
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!("Initiating graceful shutdown...");
            if shutdown_tx.send(true).is_err() {
                error!("Failed to send shutdown signal");
            }
            if let Err(e) = served.await {
                error!(error = %e, "API gateway failed during shutdown");
            }
        }
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = observer_handle.await {
        error!(error = %e, "Metrics observer panicked");
    }

    info!("Shutdown complete");
    Ok(())
}
