//! Order and case records, request payloads and query views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Contract, DisputeResolution, OrderId, OrderState, Side, TransactionRecord};

// =============================================================================
// STORED RECORDS
// =============================================================================

/// One order as held by a side's store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub contract: Contract,
    pub state: OrderState,
    /// Set by payment detection, independent of `state`.
    pub funded: bool,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    pub read: bool,
}

impl OrderRecord {
    /// Unread, unfunded order with no transactions.
    pub fn new(order_id: impl Into<OrderId>, contract: Contract, state: OrderState) -> Self {
        Self {
            order_id: order_id.into(),
            contract,
            state,
            funded: false,
            transactions: Vec::new(),
            read: false,
        }
    }

    pub fn funded(mut self, funded: bool) -> Self {
        self.funded = funded;
        self
    }

    pub fn with_transaction(mut self, txid: impl Into<String>, value: i64) -> Self {
        self.transactions.push(TransactionRecord {
            txid: txid.into(),
            value,
        });
        self
    }
}

/// An order record together with the side whose store holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedOrder {
    pub side: Side,
    pub record: OrderRecord,
}

/// Dispute metadata keyed by order id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub order_id: OrderId,
    pub buyer_contract: Option<Contract>,
    pub vendor_contract: Option<Contract>,
    #[serde(default)]
    pub buyer_contract_validation_errors: Vec<String>,
    #[serde(default)]
    pub vendor_contract_validation_errors: Vec<String>,
    pub state: OrderState,
    pub read: bool,
    #[serde(rename = "timestamp")]
    pub opened_at: DateTime<Utc>,
    pub buyer_opened: bool,
    pub claim: String,
    pub resolution: Option<DisputeResolution>,
}

impl CaseRecord {
    /// A freshly opened case. The caller's contract goes in its own slot.
    pub fn open(
        order_id: OrderId,
        opener: Side,
        contract: Contract,
        claim: String,
        opened_at: DateTime<Utc>,
    ) -> Self {
        let buyer_opened = opener == Side::Purchase;
        let (buyer_contract, vendor_contract) = if buyer_opened {
            (Some(contract), None)
        } else {
            (None, Some(contract))
        };
        Self {
            order_id,
            buyer_contract,
            vendor_contract,
            buyer_contract_validation_errors: Vec::new(),
            vendor_contract_validation_errors: Vec::new(),
            state: OrderState::Disputed,
            read: false,
            opened_at,
            buyer_opened,
            claim,
            resolution: None,
        }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub order_id: OrderId,
    #[serde(default)]
    pub reject: bool,
}

/// Body of every operation that needs only the order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdRequest {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFulfillment {
    pub order_id: OrderId,
    #[serde(default)]
    pub note: String,
    /// Delivery details (tracking, download link, ...), passed through.
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDisputeRequest {
    pub order_id: OrderId,
    #[serde(default)]
    pub claim: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseDisputeRequest {
    pub order_id: OrderId,
    #[serde(default)]
    pub resolution: String,
    pub buyer_percentage: f32,
    pub vendor_percentage: f32,
}

impl CloseDisputeRequest {
    pub fn decision(&self) -> DisputeResolution {
        DisputeResolution {
            buyer_percentage: self.buyer_percentage,
            vendor_percentage: self.vendor_percentage,
            resolution: self.resolution.clone(),
        }
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// A committed state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionReceipt {
    pub order_id: OrderId,
    pub side: Side,
    pub from: OrderState,
    pub to: OrderState,
}

/// Full order view returned by the order query.
///
/// `read` is the value before the query marked the order read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub contract: Contract,
    pub state: OrderState,
    pub funded: bool,
    pub read: bool,
    pub transactions: Vec<TransactionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseRecord>,
}

impl OrderView {
    pub fn new(record: OrderRecord, case: Option<CaseRecord>) -> Self {
        Self {
            contract: record.contract,
            state: record.state,
            funded: record.funded,
            read: record.read,
            transactions: record.transactions,
            case,
        }
    }
}
