//! Structured logging setup.
//!
//! Every log line carries a `subsystem` field when emitted through the
//! macros below, so JSON output can be filtered per subsystem.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()));
    }

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
    }
}

/// Log an order-related event with standard fields.
#[macro_export]
macro_rules! log_order_event {
    ($level:ident, $subsystem:expr, $msg:expr, $order_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            order_id = %$order_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a peer-related event with standard fields.
#[macro_export]
macro_rules! log_peer_event {
    ($level:ident, $subsystem:expr, $msg:expr, $peer_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            peer_id = %$peer_id,
            $($($field)*,)?
            $msg
        )
    };
}
