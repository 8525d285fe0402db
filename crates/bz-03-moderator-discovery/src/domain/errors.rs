//! Domain Errors for Moderator Discovery

use shared_types::CollaboratorError;

/// Why a single address or identity could not be decoded.
///
/// Never surfaced to callers; a failing address is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("protocol {0} is missing its value")]
    MissingValue(String),

    #[error("empty address")]
    Empty,

    #[error("no peer identity component")]
    NoIdentity,

    #[error("identity is not base58: {0}")]
    Base58(String),

    #[error("identity is not a multihash: {0}")]
    Multihash(String),

    #[error("identity digest is not a peer id: {0}")]
    NotUtf8(String),
}

/// Errors surfaced by the discovery service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    /// The distributed lookup could not run.
    #[error("{0}")]
    LookupFailed(String),

    #[error("Profile does not exist. Create one first.")]
    ProfileMissing,

    #[error("{0}")]
    InvalidModeratorInfo(String),

    /// Reading or writing the profile failed.
    #[error("{0}")]
    Storage(String),

    /// Rebuilding the follow index failed after the primary change.
    #[error("File Write Error: {0}")]
    FollowIndex(String),

    /// Re-announcing published content failed after the primary change.
    #[error("IPNS Error: {0}")]
    Announce(String),
}

impl DiscoveryError {
    pub fn storage(err: CollaboratorError) -> Self {
        Self::Storage(err.0)
    }
}
