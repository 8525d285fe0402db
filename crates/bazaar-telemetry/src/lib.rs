//! # Bazaar Telemetry
//!
//! Logging and metrics for the Bazaar node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let metrics = init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BZ_SERVICE_NAME` | `bazaar-node` | Service name in the startup line |
//! | `BZ_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `BZ_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `BZ_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{encode_metrics, register_metrics, BazaarMetrics, REGISTRY};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register the node's counters globally.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<BazaarMetrics, TelemetryError> {
    let metrics = register_metrics()?;
    init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        log_level = %config.log_level,
        "Telemetry initialized"
    );

    Ok(metrics)
}
