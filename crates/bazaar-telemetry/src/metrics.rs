//! Prometheus metrics for the Bazaar node.
//!
//! All metrics follow the naming convention: `bz_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();
}

/// Counters fed by the runtime's bus observer and bandwidth reporter.
#[derive(Clone)]
pub struct BazaarMetrics {
    /// Committed order transitions, labelled by target state.
    pub order_transitions: IntCounterVec,
    /// Moderators delivered by asynchronous discovery.
    pub moderators_discovered: IntCounter,
    /// Bytes read from metered streams, labelled by protocol.
    pub stream_bytes_received: IntCounterVec,
    /// Bytes written to metered streams, labelled by protocol.
    pub stream_bytes_sent: IntCounterVec,
}

impl BazaarMetrics {
    /// Build unregistered collectors.
    pub fn new() -> Result<Self, TelemetryError> {
        let metrics_err = |e: prometheus::Error| TelemetryError::MetricsInit(e.to_string());

        Ok(Self {
            order_transitions: IntCounterVec::new(
                Opts::new("bz_order_transitions_total", "Committed order state transitions"),
                &["to_state"],
            )
            .map_err(metrics_err)?,
            moderators_discovered: IntCounter::new(
                "bz_moderators_discovered_total",
                "Moderators delivered by asynchronous discovery",
            )
            .map_err(metrics_err)?,
            stream_bytes_received: IntCounterVec::new(
                Opts::new(
                    "bz_stream_bytes_received_total",
                    "Bytes read from metered peer streams",
                ),
                &["protocol"],
            )
            .map_err(metrics_err)?,
            stream_bytes_sent: IntCounterVec::new(
                Opts::new(
                    "bz_stream_bytes_sent_total",
                    "Bytes written to metered peer streams",
                ),
                &["protocol"],
            )
            .map_err(metrics_err)?,
        })
    }

    /// Register every collector with `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), TelemetryError> {
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(self.order_transitions.clone()),
            Box::new(self.moderators_discovered.clone()),
            Box::new(self.stream_bytes_received.clone()),
            Box::new(self.stream_bytes_sent.clone()),
        ];

        for collector in collectors {
            registry
                .register(collector)
                .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        }
        Ok(())
    }
}

/// Register a fresh set of counters with the global registry.
///
/// Fails on a second call, as the names are already taken.
pub fn register_metrics() -> Result<BazaarMetrics, TelemetryError> {
    let metrics = BazaarMetrics::new()?;
    metrics.register(&REGISTRY)?;
    Ok(metrics)
}

/// Encode all metrics in `registry` as Prometheus text format.
pub fn encode_metrics(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
