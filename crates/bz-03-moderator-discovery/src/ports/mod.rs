//! Ports layer - hexagonal architecture boundaries.

pub mod inbound;
pub mod outbound;

pub use inbound::{ModeratorDiscoveryApi, PendingSearch};
pub use outbound::{PointerLookup, ProfileStore};
