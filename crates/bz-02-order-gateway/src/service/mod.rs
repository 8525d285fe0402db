//! # Order Gateway Service
//!
//! Implements `OrderGatewayApi` over the driven ports.
//!
//! Mutating operations are serialised per order id, so the
//! lookup, check, execute and commit sequence of one request never
//! interleaves with another request on the same order.

mod api;
mod core;
mod locks;
mod repository;

pub use self::core::OrderGatewayService;
