//! # Bazaar Test Suite
//!
//! Cross-subsystem tests run against a fully wired node.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs       # Node container + router driven with oneshot
//!     ├── order_flows.rs   # Order and dispute scenarios over HTTP
//!     └── discovery_flows.rs # Moderator discovery over HTTP and the bus
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bz-tests
//! cargo bench -p bz-tests
//! ```

pub mod integration;
