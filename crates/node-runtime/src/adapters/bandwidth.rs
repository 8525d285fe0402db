//! Bandwidth reporter feeding both the in-process counter and Prometheus.

use bazaar_telemetry::{log_peer_event, BazaarMetrics};
use bz_01_metered_stream::{BandwidthCounter, BandwidthReporter};
use shared_types::{PeerId, ProtocolId};
use std::sync::Arc;

/// Reporter handed to every metered stream the node opens.
pub struct PrometheusBandwidthReporter {
    counter: Arc<BandwidthCounter>,
    metrics: BazaarMetrics,
}

impl PrometheusBandwidthReporter {
    pub fn new(counter: Arc<BandwidthCounter>, metrics: BazaarMetrics) -> Self {
        Self { counter, metrics }
    }

    pub fn counter(&self) -> &BandwidthCounter {
        &self.counter
    }
}

impl BandwidthReporter for PrometheusBandwidthReporter {
    fn log_recv_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId) {
        self.counter.log_recv_stream(bytes, protocol, peer);
        self.metrics
            .stream_bytes_received
            .with_label_values(&[protocol.as_str()])
            .inc_by(bytes);
        log_peer_event!(trace, "metered-stream", "read", peer, bytes = bytes, protocol = %protocol);
    }

    fn log_sent_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId) {
        self.counter.log_sent_stream(bytes, protocol, peer);
        self.metrics
            .stream_bytes_sent
            .with_label_values(&[protocol.as_str()])
            .inc_by(bytes);
        log_peer_event!(trace, "metered-stream", "write", peer, bytes = bytes, protocol = %protocol);
    }
}
