//! # Core Domain Entities
//!
//! Defines the marketplace entities shared by the order gateway, moderator
//! discovery and the API surface.
//!
//! ## Clusters
//!
//! - **Orders**: `OrderId`, `Side`, `OrderState`, `Contract`, `TransactionRecord`
//! - **Disputes**: `DisputeResolution`
//! - **Networking**: `PeerId`, `ProtocolId`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: ORDERS
// =============================================================================

/// Opaque, stable identifier of one buyer/seller transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which store (perspective) owns an order record.
///
/// A given `OrderId` lives in at most one side's store at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// We are the buyer.
    Purchase,
    /// We are the vendor.
    Sale,
}

impl Side {
    /// Both partitions, in lookup order.
    pub const LOOKUP_ORDER: [Side; 2] = [Side::Purchase, Side::Sale];

    /// Lower-case name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Purchase => "purchase",
            Side::Sale => "sale",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an order.
///
/// The set is closed per release but the transition policy is table driven,
/// so adding a state only requires new table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    Confirmed,
    Funded,
    Fulfilled,
    Disputed,
    Decided,
    Resolved,
    Canceled,
    Rejected,
    Refunded,
    Completed,
}

impl OrderState {
    /// Every state, in rough lifecycle order.
    pub const ALL: [OrderState; 11] = [
        OrderState::Pending,
        OrderState::Confirmed,
        OrderState::Funded,
        OrderState::Fulfilled,
        OrderState::Disputed,
        OrderState::Decided,
        OrderState::Resolved,
        OrderState::Canceled,
        OrderState::Rejected,
        OrderState::Refunded,
        OrderState::Completed,
    ];

    /// Wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "PENDING",
            OrderState::Confirmed => "CONFIRMED",
            OrderState::Funded => "FUNDED",
            OrderState::Fulfilled => "FULFILLED",
            OrderState::Disputed => "DISPUTED",
            OrderState::Decided => "DECIDED",
            OrderState::Resolved => "RESOLVED",
            OrderState::Canceled => "CANCELED",
            OrderState::Rejected => "REJECTED",
            OrderState::Refunded => "REFUNDED",
            OrderState::Completed => "COMPLETED",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|state| state.as_str() == s)
    }

    /// States no operation leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Canceled
                | OrderState::Rejected
                | OrderState::Refunded
                | OrderState::Completed
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Payment straight to the vendor.
    #[default]
    Direct,
    /// Vendor-generated payment address.
    AddressRequest,
    /// 2-of-3 escrow with a third-party moderator.
    Moderated,
}

impl PaymentMethod {
    /// Only moderated escrow can be disputed.
    pub fn is_moderated(&self) -> bool {
        matches!(self, PaymentMethod::Moderated)
    }
}

/// The signed agreement between buyer and vendor.
///
/// Opaque to the lifecycle policy except for the payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Payment method selected in the buyer's order.
    pub payment_method: PaymentMethod,
    /// The full signed document.
    #[serde(default)]
    pub document: serde_json::Value,
}

impl Contract {
    /// Contract with an empty document.
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            document: serde_json::Value::Null,
        }
    }
}

/// A payment-chain record tied to an order's funding or payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Transaction id on the payment chain.
    pub txid: String,
    /// Signed value in the chain's base unit (negative for spends).
    pub value: i64,
}

// =============================================================================
// CLUSTER B: DISPUTES
// =============================================================================

/// The moderator's decision on a dispute: payout split plus free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DisputeResolution {
    /// Percentage of escrowed funds paid to the buyer.
    pub buyer_percentage: f32,
    /// Percentage of escrowed funds paid to the vendor.
    pub vendor_percentage: f32,
    /// Moderator's written resolution.
    pub resolution: String,
}

// =============================================================================
// CLUSTER C: NETWORKING
// =============================================================================

/// Remote peer identity as rendered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PeerId(pub String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stream protocol identifier, e.g. `/openbazaar/app/1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProtocolId(pub String);

impl ProtocolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
