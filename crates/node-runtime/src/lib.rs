//! # Node Runtime Library
//!
//! Exposes the runtime's wiring for the binary and for the workspace test
//! suite.
//!
//! - `container/` - configuration and the subsystem container
//! - `adapters/` - runtime implementations of subsystem ports
//! - `handlers/` - bus-driven background tasks

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod container;
pub mod handlers;

pub use container::{ConfigError, NodeConfig, NodeContainer};
