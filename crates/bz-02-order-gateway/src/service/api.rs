//! `OrderGatewayApi` implementation.
//!
//! Every mutating operation runs lock, locate, validate, execute, commit.
//! Nothing with side effects is called before validation passes.

use super::core::OrderGatewayService;
use crate::domain::{
    validate_split, CaseRecord, CloseDisputeRequest, ConfirmRequest, GatewayError,
    OpenDisputeRequest, OrderFulfillment, OrderIdRequest, OrderRatings, OrderView, Operation,
    TransitionReceipt,
};
use crate::ports::OrderGatewayApi;
use async_trait::async_trait;
use shared_types::{OrderId, OrderState, Side};
use tracing::{debug, instrument, warn};

pub(crate) const CASE_NOT_FOUND: &str = "case not found";

fn case_not_found() -> GatewayError {
    GatewayError::NotFoundCase(CASE_NOT_FOUND.to_string())
}

#[async_trait]
impl OrderGatewayApi for OrderGatewayService {
    #[instrument(skip(self, req), fields(order_id = %req.order_id, reject = req.reject))]
    async fn confirm_order(&self, req: ConfirmRequest) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::Confirm.lookup())
            .await?;

        let op = if req.reject {
            Operation::Reject
        } else {
            Operation::Confirm
        };
        let to = self.check(op, &order)?;

        if req.reject {
            self.executor.reject_order(&order.record).await?;
        } else {
            self.executor.confirm_order(&order.record).await?;
        }
        self.commit(&order, to).await
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn cancel_order(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::Cancel.lookup())
            .await?;
        let to = self.check(Operation::Cancel, &order)?;

        self.executor.cancel_order(&order.record).await?;
        self.commit(&order, to).await
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn fulfill_order(
        &self,
        req: OrderFulfillment,
    ) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::Fulfill.lookup())
            .await?;
        let to = self.check(Operation::Fulfill, &order)?;

        self.executor.fulfill_order(&order.record, &req).await?;
        self.commit(&order, to).await
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id, ratings = req.ratings.len()))]
    async fn complete_order(&self, req: OrderRatings) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::Complete.lookup())
            .await?;
        req.validate()?;
        let to = self.check(Operation::Complete, &order)?;

        self.executor.complete_order(&order.record, &req).await?;
        self.commit(&order, to).await
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn open_dispute(
        &self,
        req: OpenDisputeRequest,
    ) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::OpenDispute.lookup())
            .await?;
        let to = self.check(Operation::OpenDispute, &order)?;
        if req.claim.trim().is_empty() {
            return Err(GatewayError::ValidationFailed(
                "a dispute claim is required".to_string(),
            ));
        }

        self.executor
            .open_dispute(&order.record, &req.claim)
            .await?;
        let case = CaseRecord::open(
            req.order_id.clone(),
            order.side,
            order.record.contract.clone(),
            req.claim,
            self.clock.now(),
        );
        self.cases.put_case(case).await?;
        self.commit(&order, to).await
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn close_dispute(
        &self,
        req: CloseDisputeRequest,
    ) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let case = self
            .cases
            .get_case(&req.order_id)
            .await?
            .ok_or_else(case_not_found)?;
        validate_split(req.buyer_percentage, req.vendor_percentage)?;
        if case.state != OrderState::Disputed {
            return Err(GatewayError::InvalidState(
                "case must be disputed to close the dispute".to_string(),
            ));
        }

        // A moderator usually holds no local copy of the order.
        let local = self
            .repository
            .find(&req.order_id, Operation::CloseDispute.lookup())
            .await?;
        let local_to = match &local {
            Some(order) => Some(self.check(Operation::CloseDispute, order)?),
            None => None,
        };

        let decision = req.decision();
        self.executor.close_dispute(&case, &decision).await?;
        self.cases
            .record_resolution(&req.order_id, decision)
            .await?;

        match (local, local_to) {
            (Some(order), Some(to)) => self.commit(&order, to).await,
            _ => {
                debug!("No local order; case decided only");
                let opener = if case.buyer_opened {
                    Side::Purchase
                } else {
                    Side::Sale
                };
                Ok(self
                    .announce(req.order_id, opener, case.state, OrderState::Decided)
                    .await)
            }
        }
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn release_funds(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::ReleaseFunds.lookup())
            .await?;
        let to = self.check(Operation::ReleaseFunds, &order)?;
        let resolution = self
            .cases
            .get_case(&req.order_id)
            .await?
            .ok_or_else(case_not_found)?
            .resolution
            .ok_or_else(|| {
                GatewayError::InvalidState("dispute has no recorded resolution".to_string())
            })?;

        self.executor
            .release_funds(&order.record, &resolution)
            .await?;
        let receipt = self.commit(&order, to).await?;
        self.cases.update_state(&req.order_id, to).await?;
        Ok(receipt)
    }

    #[instrument(skip(self, req), fields(order_id = %req.order_id))]
    async fn refund_order(&self, req: OrderIdRequest) -> Result<TransitionReceipt, GatewayError> {
        let _guard = self.locks.acquire(&req.order_id).await;
        let order = self
            .repository
            .locate(&req.order_id, Operation::Refund.lookup())
            .await?;
        let to = self.check(Operation::Refund, &order)?;

        self.executor.refund_order(&order.record).await?;
        self.commit(&order, to).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: &OrderId) -> Result<OrderView, GatewayError> {
        let order = self.repository.locate(order_id, &Side::LOOKUP_ORDER).await?;
        let case = self.cases.get_case(order_id).await?;

        if let Err(e) = self.repository.store(order.side).mark_as_read(order_id).await {
            warn!(error = %e, "Failed to mark order read");
        }
        Ok(OrderView::new(order.record, case))
    }

    #[instrument(skip(self))]
    async fn get_case(&self, order_id: &OrderId) -> Result<CaseRecord, GatewayError> {
        let case = self
            .cases
            .get_case(order_id)
            .await?
            .ok_or_else(case_not_found)?;

        if let Err(e) = self.cases.mark_as_read(order_id).await {
            warn!(error = %e, "Failed to mark case read");
        }
        Ok(case)
    }
}
