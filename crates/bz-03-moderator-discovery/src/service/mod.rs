//! # Moderator Discovery Service
//!
//! Implements `ModeratorDiscoveryApi`: batch and streamed discovery over
//! the role pointer, and moderator self-registration.

mod api;
mod core;
mod search;

pub use self::core::ModeratorDiscoveryService;
