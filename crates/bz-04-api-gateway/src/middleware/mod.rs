//! Middleware stack for the gateway.
//!
//! Request spans come from `tower_http::trace::TraceLayer`; this module adds
//! the request counters.

pub mod metrics;

pub use metrics::{track_requests, GatewayMetrics, RequestTimer};
