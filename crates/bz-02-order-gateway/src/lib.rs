//! # Order & Dispute Lifecycle Gateway
//!
//! **Subsystem ID:** 2
//!
//! Enforces the legal state transitions of purchase and sale orders and
//! their disputes, then delegates each accepted operation to the
//! transaction-execution layer.
//!
//! ## Transition Table
//!
//! | Operation | Side | From | To |
//! |-----------|------|------|----|
//! | Confirm | Sale | PENDING (funded) | CONFIRMED |
//! | Confirm(reject) | Sale | PENDING | REJECTED |
//! | Cancel | Purchase | PENDING | CANCELED |
//! | Fulfill | Sale | FUNDED | FULFILLED |
//! | Complete | Purchase | FULFILLED, RESOLVED | COMPLETED |
//! | Open dispute | Purchase | CONFIRMED, FUNDED, FULFILLED (moderated) | DISPUTED |
//! | Open dispute | Sale | FUNDED, FULFILLED (moderated) | DISPUTED |
//! | Close dispute | either | DISPUTED | DECIDED |
//! | Release funds | either | DECIDED | RESOLVED |
//! | Refund | Sale | FUNDED, FULFILLED | REFUNDED |
//!
//! The table lives in [`domain::transitions`] as data; the service never
//! branches on states directly.
//!
//! ## Architecture
//!
//! - **Domain Layer:** transition table, ratings, records and errors
//! - **Ports Layer:** [`OrderGatewayApi`] (driving), [`OrderStore`],
//!   [`CaseStore`], [`OrderExecutor`], [`TimeSource`] (driven)
//! - **Service Layer:** [`OrderGatewayService`]
//! - **Adapters Layer:** in-memory stores and a recording executor

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryCaseStore, InMemoryOrderStore, LedgerEntry, LedgerExecutor};
pub use domain::{
    CaseRecord, CloseDisputeRequest, ConfirmRequest, ErrorKind, GatewayError, OpenDisputeRequest,
    OrderFulfillment, OrderIdRequest, OrderRatings, OrderRecord, OrderView, Rating,
    TransitionReceipt,
};
pub use ports::{CaseStore, OrderExecutor, OrderGatewayApi, OrderStore, TimeSource};
pub use service::OrderGatewayService;
