//! In-memory profile store and a logging republisher.

use crate::domain::Profile;
use crate::ports::ProfileStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{CollaboratorError, Republisher};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profile: RwLock<Option<Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }

    pub fn current(&self) -> Option<Profile> {
        self.profile.read().clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self) -> Result<Option<Profile>, CollaboratorError> {
        Ok(self.current())
    }

    async fn update_profile(&self, profile: Profile) -> Result<(), CollaboratorError> {
        *self.profile.write() = Some(profile);
        Ok(())
    }
}

/// Republisher that only logs and counts.
///
/// Used when the node has no publish layer attached.
#[derive(Debug, Default)]
pub struct LoggingRepublisher {
    follow_updates: AtomicU64,
    announcements: AtomicU64,
}

impl LoggingRepublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_updates(&self) -> u64 {
        self.follow_updates.load(Ordering::Relaxed)
    }

    pub fn announcements(&self) -> u64 {
        self.announcements.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Republisher for LoggingRepublisher {
    async fn update_follow_index(&self) -> Result<(), CollaboratorError> {
        self.follow_updates.fetch_add(1, Ordering::Relaxed);
        info!("Follow index rebuilt");
        Ok(())
    }

    async fn announce(&self) -> Result<(), CollaboratorError> {
        self.announcements.fetch_add(1, Ordering::Relaxed);
        info!("Published documents re-announced");
        Ok(())
    }
}
