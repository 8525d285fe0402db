//! `ModeratorDiscoveryApi` implementation.

use super::core::ModeratorDiscoveryService;
use super::search::run_search;
use crate::domain::{moderator_from_record, DiscoveryError, ModeratorId, ModeratorInfo, Profile};
use crate::ports::{ModeratorDiscoveryApi, PendingSearch};
use async_trait::async_trait;
use shared_types::CorrelationId;
use tracing::{info, instrument};

impl ModeratorDiscoveryService {
    async fn load_profile(&self) -> Result<Profile, DiscoveryError> {
        self.profiles
            .get_profile()
            .await
            .map_err(DiscoveryError::storage)?
            .ok_or(DiscoveryError::ProfileMissing)
    }

    /// Rebuild the follow index, then re-announce. Runs after the profile
    /// change is stored and never undoes it.
    async fn republish(&self) -> Result<(), DiscoveryError> {
        self.republisher
            .update_follow_index()
            .await
            .map_err(|e| DiscoveryError::FollowIndex(e.0))?;
        self.republisher
            .announce()
            .await
            .map_err(|e| DiscoveryError::Announce(e.0))
    }
}

#[async_trait]
impl ModeratorDiscoveryApi for ModeratorDiscoveryService {
    #[instrument(skip(self))]
    async fn discover(&self) -> Result<Vec<ModeratorId>, DiscoveryError> {
        let records = self
            .lookup
            .find_pointers(&self.config.pointer, self.config.max_results)
            .await
            .map_err(|e| DiscoveryError::LookupFailed(e.0))?;

        let found = records.len();
        let moderators: Vec<ModeratorId> = records
            .iter()
            .filter_map(moderator_from_record)
            .take(self.config.max_results)
            .collect();

        info!(records = found, moderators = moderators.len(), "Moderator lookup complete");
        Ok(moderators)
    }

    fn discover_async(&self) -> PendingSearch {
        let correlation_id = CorrelationId::new();
        info!(correlation_id = %correlation_id, "Starting moderator search");

        let (pending, released) = PendingSearch::new(correlation_id);
        tokio::spawn(run_search(
            self.lookup.clone(),
            self.events.clone(),
            self.config.pointer.clone(),
            self.config.max_results,
            correlation_id,
            released,
        ));
        pending
    }

    #[instrument(skip(self, info))]
    async fn register_self(&self, info: ModeratorInfo) -> Result<(), DiscoveryError> {
        let mut profile = self.load_profile().await?;
        info.validate()?;

        profile.moderator = true;
        profile.mod_info = Some(info);
        self.profiles
            .update_profile(profile)
            .await
            .map_err(DiscoveryError::storage)?;

        self.republish().await
    }

    #[instrument(skip(self))]
    async fn unregister_self(&self) -> Result<(), DiscoveryError> {
        let mut profile = self.load_profile().await?;

        profile.moderator = false;
        profile.mod_info = None;
        self.profiles
            .update_profile(profile)
            .await
            .map_err(DiscoveryError::storage)?;

        self.republish().await
    }
}
