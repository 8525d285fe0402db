//! Adapters layer - concrete implementations of the driven ports.

pub mod lookup;
pub mod profile;

pub use lookup::StaticPointerLookup;
pub use profile::{InMemoryProfileStore, LoggingRepublisher};
