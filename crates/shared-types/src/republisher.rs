//! # Republisher Port
//!
//! Secondary side effects run after a profile- or listing-affecting change
//! commits: rewrite the public follow/following index and re-announce the
//! node's published document set.

use crate::errors::CollaboratorError;
use async_trait::async_trait;

/// Driven port for the publish layer.
///
/// Both calls happen after the primary effect is durable. A failure is
/// reported to the caller but never undoes the primary change.
#[async_trait]
pub trait Republisher: Send + Sync {
    /// Rewrite the public follow/following index.
    async fn update_follow_index(&self) -> Result<(), CollaboratorError>;

    /// Re-announce the node's published document root.
    async fn announce(&self) -> Result<(), CollaboratorError>;
}
