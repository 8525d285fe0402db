//! Ledger executor
//!
//! An [`OrderExecutor`] that performs no payments and records each
//! requested action instead. The node runtime uses it when no wallet is
//! attached; tests use it to observe exactly which side effects ran.

use crate::domain::{CaseRecord, OrderFulfillment, OrderRatings, OrderRecord};
use crate::ports::OrderExecutor;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{CollaboratorError, DisputeResolution, OrderId};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEntry {
    Confirmed(OrderId),
    Rejected(OrderId),
    Canceled(OrderId),
    Fulfilled { order_id: OrderId, note: String },
    Completed { order_id: OrderId, ratings: usize },
    DisputeOpened { order_id: OrderId, claim: String },
    DisputeClosed { order_id: OrderId, resolution: DisputeResolution },
    FundsReleased { order_id: OrderId, to_buyer: i64, to_vendor: i64 },
    Refunded { order_id: OrderId, amount: i64 },
}

/// Sum of incoming payments to the order's address.
pub fn escrowed(order: &OrderRecord) -> i64 {
    order
        .transactions
        .iter()
        .map(|tx| tx.value)
        .filter(|v| *v > 0)
        .sum()
}

/// Split `amount` by the buyer's percentage. The vendor gets the remainder.
pub fn payout_split(amount: i64, buyer_percentage: f32) -> (i64, i64) {
    let to_buyer = ((amount as f64) * f64::from(buyer_percentage) / 100.0).round() as i64;
    let to_buyer = to_buyer.clamp(0, amount.max(0));
    (to_buyer, amount - to_buyer)
}

#[derive(Debug, Default)]
pub struct LedgerExecutor {
    entries: Mutex<Vec<LedgerEntry>>,
}

impl LedgerExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything executed so far, oldest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.lock().clone()
    }

    fn record(&self, entry: LedgerEntry) -> Result<(), CollaboratorError> {
        debug!(?entry, "Ledger entry");
        self.entries.lock().push(entry);
        Ok(())
    }
}

#[async_trait]
impl OrderExecutor for LedgerExecutor {
    async fn confirm_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Confirmed(order.order_id.clone()))
    }

    async fn reject_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Rejected(order.order_id.clone()))
    }

    async fn cancel_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Canceled(order.order_id.clone()))
    }

    async fn fulfill_order(
        &self,
        order: &OrderRecord,
        fulfillment: &OrderFulfillment,
    ) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Fulfilled {
            order_id: order.order_id.clone(),
            note: fulfillment.note.clone(),
        })
    }

    async fn complete_order(
        &self,
        order: &OrderRecord,
        ratings: &OrderRatings,
    ) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Completed {
            order_id: order.order_id.clone(),
            ratings: ratings.ratings.len(),
        })
    }

    async fn open_dispute(
        &self,
        order: &OrderRecord,
        claim: &str,
    ) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::DisputeOpened {
            order_id: order.order_id.clone(),
            claim: claim.to_string(),
        })
    }

    async fn close_dispute(
        &self,
        case: &CaseRecord,
        resolution: &DisputeResolution,
    ) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::DisputeClosed {
            order_id: case.order_id.clone(),
            resolution: resolution.clone(),
        })
    }

    async fn release_funds(
        &self,
        order: &OrderRecord,
        resolution: &DisputeResolution,
    ) -> Result<(), CollaboratorError> {
        let (to_buyer, to_vendor) = payout_split(escrowed(order), resolution.buyer_percentage);
        self.record(LedgerEntry::FundsReleased {
            order_id: order.order_id.clone(),
            to_buyer,
            to_vendor,
        })
    }

    async fn refund_order(&self, order: &OrderRecord) -> Result<(), CollaboratorError> {
        self.record(LedgerEntry::Refunded {
            order_id: order.order_id.clone(),
            amount: escrowed(order),
        })
    }
}
