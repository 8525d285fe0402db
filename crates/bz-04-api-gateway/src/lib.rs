//! # API Gateway Subsystem
//!
//! **Subsystem ID:** 4
//!
//! HTTP and WebSocket surface of the node. Routes under `/ob` dispatch to
//! the order gateway and moderator discovery; `/ws` pushes bus events to
//! connected clients.
//!
//! ```text
//!   HTTP client ──► TraceLayer ──► request counters ──► /ob/* handlers
//!                                                          │
//!                          ┌───────────────────────────────┤
//!                          ▼                               ▼
//!                  OrderGatewayApi              ModeratorDiscoveryApi
//!                                                          │ async search
//!                                                          ▼
//!   WebSocket client ◄──────────── /ws ◄──────────── event bus
//! ```
//!
//! Failures are rendered as `{"success": false, "reason": "..."}`; see
//! [`domain::error`] for the status mapping.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod rest;
pub mod router;
pub mod service;
pub mod ws;

pub use domain::{ApiError, ConfigError, GatewayConfig};
pub use middleware::GatewayMetrics;
pub use router::{build_router, AppState};
pub use service::{ApiGatewayService, ServeError};
