//! # Shared Bus - Event Bus for Market Events
//!
//! Carries order transitions and streamed moderator discovery results from
//! the subsystems that produce them to any number of subscribers (the
//! WebSocket endpoint, tests, future indexers).
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Order Gateway│                    │  WebSocket   │
//! │  Discovery   │    publish()       │  forwarder   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing is non-blocking. A subscriber that falls more than
//! `capacity` events behind loses the oldest ones.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, MarketEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
