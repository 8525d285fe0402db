//! # Shared Types Crate
//!
//! This crate contains the marketplace entities, the correlation identifier
//! and the driven ports that more than one subsystem depends on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Opaque Documents**: Contracts are carried as JSON documents; only the
//!   fields the lifecycle policy reads (payment method) are typed.
//! - **No Ambient Node Handle**: Collaborators are passed in as trait objects
//!   at construction time; nothing here is a global.

pub mod correlation;
pub mod entities;
pub mod errors;
pub mod republisher;

pub use correlation::CorrelationId;
pub use entities::*;
pub use errors::*;
pub use republisher::Republisher;
