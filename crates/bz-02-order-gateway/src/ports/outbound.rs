//! # Driven Ports (Outbound SPI)
//!
//! Collaborators the gateway calls but does not own: the per-side order
//! stores, the case store, the execution layer (wallet plus contract
//! signing) and a clock.

use crate::domain::{CaseRecord, OrderFulfillment, OrderRatings, OrderRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{CollaboratorError, DisputeResolution, OrderId, OrderState};

/// Orders held from one side's perspective.
///
/// The node keeps one instance for purchases and one for sales. A given
/// order id lives in at most one of them.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_by_order_id(&self, order_id: &OrderId)
        -> Result<Option<OrderRecord>, CollaboratorError>;

    async fn mark_as_read(&self, order_id: &OrderId) -> Result<(), CollaboratorError>;

    /// Persist a new state. Implementations reset `read` to false.
    async fn update_state(
        &self,
        order_id: &OrderId,
        state: OrderState,
    ) -> Result<(), CollaboratorError>;
}

/// Dispute cases keyed by order id.
#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn get_case(&self, order_id: &OrderId) -> Result<Option<CaseRecord>, CollaboratorError>;

    /// Create or replace a case.
    async fn put_case(&self, case: CaseRecord) -> Result<(), CollaboratorError>;

    async fn mark_as_read(&self, order_id: &OrderId) -> Result<(), CollaboratorError>;

    /// Store the moderator's decision and move the case to DECIDED.
    async fn record_resolution(
        &self,
        order_id: &OrderId,
        resolution: DisputeResolution,
    ) -> Result<(), CollaboratorError>;

    async fn update_state(
        &self,
        order_id: &OrderId,
        state: OrderState,
    ) -> Result<(), CollaboratorError>;
}

/// The transaction-execution layer.
///
/// Each method receives a record whose preconditions have already been
/// checked. Implementations perform exactly the side effect named and
/// report only success or failure.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    async fn confirm_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError>;

    async fn reject_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError>;

    async fn cancel_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError>;

    async fn fulfill_order(
        &self,
        order: &OrderRecord,
        fulfillment: &OrderFulfillment,
    ) -> Result<(), CollaboratorError>;

    async fn complete_order(
        &self,
        order: &OrderRecord,
        ratings: &OrderRatings,
    ) -> Result<(), CollaboratorError>;

    async fn open_dispute(&self, order: &OrderRecord, claim: &str)
        -> Result<(), CollaboratorError>;

    /// Runs on the moderator's node, which may hold no local order.
    async fn close_dispute(
        &self,
        case: &CaseRecord,
        resolution: &DisputeResolution,
    ) -> Result<(), CollaboratorError>;

    /// Pay out escrow according to the recorded split.
    async fn release_funds(
        &self,
        order: &OrderRecord,
        resolution: &DisputeResolution,
    ) -> Result<(), CollaboratorError>;

    async fn refund_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError>;
}

/// Time source for case timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
