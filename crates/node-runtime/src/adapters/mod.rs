//! # Adapters
//!
//! Runtime-side implementations of subsystem ports.

pub mod bandwidth;

pub use bandwidth::PrometheusBandwidthReporter;
