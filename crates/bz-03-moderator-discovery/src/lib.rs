//! # Moderator Discovery Subsystem
//!
//! **Subsystem ID:** 3
//!
//! Finds peers advertising the moderator role pointer in the DHT and
//! decodes each into a moderator identity. Two modes share one decoder:
//!
//! - **Batch:** [`ModeratorDiscoveryApi::discover`] waits for the lookup and
//!   returns every moderator found.
//! - **Streamed:** [`ModeratorDiscoveryApi::discover_async`] returns a
//!   [`PendingSearch`] immediately. Once it is released the search
//!   publishes a `ModeratorFound` event per moderator and one
//!   `ModeratorSearchFinished` event on the shared bus.
//!
//! Addresses without a peer identity component, and identities that are
//! not valid multihashes carrying a peer id, are skipped silently.
//!
//! The crate also owns moderator self-registration, since that is what
//! places this node under the pointer other nodes look up.
//!
//! ## Architecture
//!
//! - **Domain Layer:** multiaddr parser, identity decoding, moderator
//!   profile, config
//! - **Ports Layer:** [`ModeratorDiscoveryApi`], [`PointerLookup`],
//!   [`ProfileStore`]
//! - **Service Layer:** [`ModeratorDiscoveryService`]
//! - **Adapters Layer:** static lookup, in-memory profile, logging
//!   republisher

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryProfileStore, LoggingRepublisher, StaticPointerLookup};
pub use domain::{
    moderator_pointer, DiscoveryConfig, DiscoveryError, ModeratorId, ModeratorInfo, PeerRecord,
    Profile,
};
pub use ports::{ModeratorDiscoveryApi, PendingSearch, PointerLookup, ProfileStore};
pub use service::ModeratorDiscoveryService;
