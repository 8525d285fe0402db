//! # Driving Ports (Inbound API)

use crate::domain::{DiscoveryError, ModeratorId, ModeratorInfo};
use async_trait::async_trait;
use shared_types::CorrelationId;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Acknowledgment of a started asynchronous search.
///
/// The search runs at once but holds its results back until every clone
/// of this value is released or dropped, so the caller can deliver the
/// acknowledgment first.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    id: CorrelationId,
    _hold: Arc<oneshot::Sender<()>>,
}

impl PendingSearch {
    /// A pending search and the receiver that resolves on release.
    pub fn new(id: CorrelationId) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let pending = Self {
            id,
            _hold: Arc::new(tx),
        };
        (pending, rx)
    }

    pub fn id(&self) -> CorrelationId {
        self.id
    }

    /// Let results flow once no other clone is held.
    pub fn release(self) {}
}

/// Primary API of the moderator discovery subsystem.
#[async_trait]
pub trait ModeratorDiscoveryApi: Send + Sync {
    /// Block until the lookup completes and return every decoded moderator.
    async fn discover(&self) -> Result<Vec<ModeratorId>, DiscoveryError>;

    /// Start a background search and return its acknowledgment at once.
    ///
    /// Results are published on the event bus tagged with the acknowledged
    /// id, after the acknowledgment is released. The search is never
    /// cancelled; it ends when the lookup is exhausted or the result bound
    /// is reached.
    fn discover_async(&self) -> PendingSearch;

    /// Advertise this node as a moderator.
    async fn register_self(&self, info: ModeratorInfo) -> Result<(), DiscoveryError>;

    /// Stop advertising this node as a moderator.
    async fn unregister_self(&self) -> Result<(), DiscoveryError>;
}
