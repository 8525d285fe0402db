//! Ports layer - hexagonal architecture boundaries.

pub mod inbound;
pub mod outbound;

pub use inbound::OrderGatewayApi;
pub use outbound::{CaseStore, OrderExecutor, OrderStore, SystemTimeSource, TimeSource};
