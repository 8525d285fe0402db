//! # Driven Ports (Outbound SPI)

use crate::domain::{PeerRecord, Profile};
use async_trait::async_trait;
use shared_types::CollaboratorError;
use tokio::sync::mpsc;

/// Distributed lookup of peers advertising a role pointer.
#[async_trait]
pub trait PointerLookup: Send + Sync {
    /// Run the lookup to completion and return every record found, at
    /// most `max`.
    async fn find_pointers(
        &self,
        pointer: &str,
        max: usize,
    ) -> Result<Vec<PeerRecord>, CollaboratorError>;

    /// Start the lookup and hand back its live result sequence.
    ///
    /// The channel closes when the lookup is exhausted or has produced
    /// `max` records.
    async fn find_pointers_stream(
        &self,
        pointer: &str,
        max: usize,
    ) -> Result<mpsc::Receiver<PeerRecord>, CollaboratorError>;
}

/// The node's own profile document.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self) -> Result<Option<Profile>, CollaboratorError>;

    async fn update_profile(&self, profile: Profile) -> Result<(), CollaboratorError>;
}
