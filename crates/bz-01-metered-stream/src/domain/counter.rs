//! Lock-free byte totals per peer, per protocol and overall.

use crate::ports::BandwidthReporter;
use dashmap::DashMap;
use shared_types::{PeerId, ProtocolId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of bytes moved in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandwidthStats {
    pub total_in: u64,
    pub total_out: u64,
}

#[derive(Debug, Default)]
struct Tally {
    inbound: AtomicU64,
    outbound: AtomicU64,
}

impl Tally {
    fn snapshot(&self) -> BandwidthStats {
        BandwidthStats {
            total_in: self.inbound.load(Ordering::Relaxed),
            total_out: self.outbound.load(Ordering::Relaxed),
        }
    }
}

/// In-process [`BandwidthReporter`] keeping running totals.
///
/// Map shards lock only while a new peer or protocol is first inserted;
/// every later update is a single atomic add.
#[derive(Debug, Default)]
pub struct BandwidthCounter {
    by_peer: DashMap<PeerId, Tally>,
    by_protocol: DashMap<ProtocolId, Tally>,
    totals: Tally,
}

impl BandwidthCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals exchanged with one peer over all protocols.
    pub fn stats_for_peer(&self, peer: &PeerId) -> BandwidthStats {
        self.by_peer
            .get(peer)
            .map(|cell| cell.snapshot())
            .unwrap_or_default()
    }

    /// Totals for one protocol over all peers.
    pub fn stats_for_protocol(&self, protocol: &ProtocolId) -> BandwidthStats {
        self.by_protocol
            .get(protocol)
            .map(|cell| cell.snapshot())
            .unwrap_or_default()
    }

    /// Totals over every metered stream.
    pub fn totals(&self) -> BandwidthStats {
        self.totals.snapshot()
    }

    /// Number of distinct peers seen so far.
    pub fn peer_count(&self) -> usize {
        self.by_peer.len()
    }

    fn add(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId, inbound: bool) {
        if bytes == 0 {
            return;
        }
        let bump = |cell: &Tally| {
            let slot = if inbound { &cell.inbound } else { &cell.outbound };
            slot.fetch_add(bytes, Ordering::Relaxed);
        };

        bump(&self.totals);
        bump(&*self.by_peer.entry(peer.clone()).or_default());
        bump(&*self.by_protocol.entry(protocol.clone()).or_default());
    }
}

impl BandwidthReporter for BandwidthCounter {
    fn log_recv_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId) {
        self.add(bytes, protocol, peer, true);
    }

    fn log_sent_stream(&self, bytes: u64, protocol: &ProtocolId, peer: &PeerId) {
        self.add(bytes, protocol, peer, false);
    }
}
