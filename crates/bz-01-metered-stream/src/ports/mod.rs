//! # Ports
//!
//! - [`BandwidthReporter`]: where byte counts go (driven)
//! - [`PeerStream`]: what a wrappable stream must expose about itself

use shared_types::{PeerId, ProtocolId};

/// Sink for per-stream byte counts.
///
/// Called inline from the stream's own read/write path, possibly from many
/// tasks at once. Implementations must not block and should limit
/// themselves to atomic updates.
pub trait BandwidthReporter: Send + Sync {
    /// Bytes returned by one read of a stream.
    fn log_recv_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId);

    /// Bytes accepted by one write to a stream.
    fn log_sent_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId);
}

/// A negotiated stream to a remote peer.
pub trait PeerStream {
    /// Protocol negotiated for this stream.
    fn protocol(&self) -> ProtocolId;

    /// Identity of the remote end.
    fn remote_peer(&self) -> PeerId;
}
