//! # Driving Ports (Inbound API)
//!
//! The operations the HTTP surface dispatches to.

use crate::domain::{
    CaseRecord, CloseDisputeRequest, ConfirmRequest, GatewayError, OpenDisputeRequest,
    OrderFulfillment, OrderIdRequest, OrderRatings, OrderView, TransitionReceipt,
};
use async_trait::async_trait;
use shared_types::OrderId;

/// Primary API of the order gateway.
///
/// Every mutating method either commits exactly one transition and returns
/// its receipt, or fails without calling any collaborator that has side
/// effects. A failure reported after such a call is always
/// [`GatewayError::Internal`] and nothing is rolled back.
#[async_trait]
pub trait OrderGatewayApi: Send + Sync {
    /// Vendor accepts (or, with `reject`, declines) a pending sale.
    async fn confirm_order(&self, req: ConfirmRequest) -> Result<TransitionReceipt, GatewayError>;

    /// Buyer withdraws a pending purchase.
    async fn cancel_order(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError>;

    async fn fulfill_order(&self, req: OrderFulfillment)
        -> Result<TransitionReceipt, GatewayError>;

    /// Buyer closes a fulfilled or resolved purchase, leaving ratings.
    async fn complete_order(&self, req: OrderRatings) -> Result<TransitionReceipt, GatewayError>;

    async fn open_dispute(&self, req: OpenDisputeRequest)
        -> Result<TransitionReceipt, GatewayError>;

    /// Moderator decides a case.
    ///
    /// The receipt's `side` is the local side when this node holds the
    /// order, otherwise the side that opened the case.
    async fn close_dispute(
        &self,
        req: CloseDisputeRequest,
    ) -> Result<TransitionReceipt, GatewayError>;

    async fn release_funds(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError>;

    async fn refund_order(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError>;

    /// Full order view. Marks the order read as a side effect.
    async fn get_order(&self, order_id: &OrderId) -> Result<OrderView, GatewayError>;

    /// Case view. Marks the case read as a side effect.
    async fn get_case(&self, order_id: &OrderId) -> Result<CaseRecord, GatewayError>;
}
