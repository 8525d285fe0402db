//! # Domain
//!
//! Bandwidth accounting.

mod counter;

pub use counter::{BandwidthCounter, BandwidthStats};
