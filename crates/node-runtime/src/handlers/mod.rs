//! # Event Handlers
//!
//! Long-running tasks fed by the event bus.

pub mod metrics_observer;

pub use metrics_observer::MetricsObserver;
