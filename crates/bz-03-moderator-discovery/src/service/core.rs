//! Service state and constructor.

use crate::domain::DiscoveryConfig;
use crate::ports::{PointerLookup, ProfileStore};
use shared_bus::EventPublisher;
use shared_types::Republisher;
use std::sync::Arc;

/// Moderator discovery service implementing
/// [`crate::ports::ModeratorDiscoveryApi`].
///
/// Owns no persistent state. Each asynchronous search owns only its
/// correlation id and the lookup channel it drains.
pub struct ModeratorDiscoveryService {
    pub(super) lookup: Arc<dyn PointerLookup>,
    pub(super) profiles: Arc<dyn ProfileStore>,
    pub(super) republisher: Arc<dyn Republisher>,
    pub(super) events: Arc<dyn EventPublisher>,
    pub(super) config: DiscoveryConfig,
}

impl ModeratorDiscoveryService {
    pub fn new(
        lookup: Arc<dyn PointerLookup>,
        profiles: Arc<dyn ProfileStore>,
        republisher: Arc<dyn Republisher>,
        events: Arc<dyn EventPublisher>,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            lookup,
            profiles,
            republisher,
            events,
            config,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}
