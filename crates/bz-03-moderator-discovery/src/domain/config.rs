//! Discovery configuration.

use super::identity::moderator_pointer;
use serde::{Deserialize, Serialize};

/// Largest result set one search delivers.
pub const DEFAULT_MAX_RESULTS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Role pointer looked up in the DHT.
    pub pointer: String,
    /// Upper bound on moderators delivered per search, in both modes.
    pub max_results: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pointer: moderator_pointer(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}
