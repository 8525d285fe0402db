//! Service state and the commit path shared by every operation.

use super::locks::OrderLocks;
use super::repository::OrderRepository;
use crate::domain::{next_state, GatewayError, LocatedOrder, Operation, TransitionReceipt};
use crate::ports::{CaseStore, OrderExecutor, OrderStore, SystemTimeSource, TimeSource};
use shared_bus::{EventPublisher, MarketEvent};
use shared_types::{OrderId, OrderState, Side};
use std::sync::Arc;
use tracing::info;

/// Order gateway service implementing [`crate::ports::OrderGatewayApi`].
///
/// Holds the transition policy only. Orders, cases and payment execution
/// belong to the collaborators passed in at construction.
pub struct OrderGatewayService {
    pub(super) repository: OrderRepository,
    pub(super) cases: Arc<dyn CaseStore>,
    pub(super) executor: Arc<dyn OrderExecutor>,
    pub(super) events: Arc<dyn EventPublisher>,
    pub(super) clock: Arc<dyn TimeSource>,
    pub(super) locks: OrderLocks,
}

impl OrderGatewayService {
    pub fn new(
        purchases: Arc<dyn OrderStore>,
        sales: Arc<dyn OrderStore>,
        cases: Arc<dyn CaseStore>,
        executor: Arc<dyn OrderExecutor>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository: OrderRepository::new(purchases, sales),
            cases,
            executor,
            events,
            clock: Arc::new(SystemTimeSource),
            locks: OrderLocks::new(),
        }
    }

    /// Replace the system clock.
    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Next state for `op` on a located order, or why not.
    pub(super) fn check(
        &self,
        op: Operation,
        order: &LocatedOrder,
    ) -> Result<OrderState, GatewayError> {
        next_state(
            op,
            order.side,
            order.record.state,
            order.record.funded,
            order.record.contract.payment_method,
        )
    }

    /// Persist `to` in the owning store, then announce it.
    pub(super) async fn commit(
        &self,
        order: &LocatedOrder,
        to: OrderState,
    ) -> Result<TransitionReceipt, GatewayError> {
        self.repository
            .store(order.side)
            .update_state(&order.record.order_id, to)
            .await?;
        Ok(self
            .announce(order.record.order_id.clone(), order.side, order.record.state, to)
            .await)
    }

    /// Log and publish a committed transition. Delivery is best effort.
    pub(super) async fn announce(
        &self,
        order_id: OrderId,
        side: Side,
        from: OrderState,
        to: OrderState,
    ) -> TransitionReceipt {
        info!(order_id = %order_id, side = %side, from = %from, to = %to, "Order transitioned");
        self.events
            .publish(MarketEvent::OrderTransitioned {
                order_id: order_id.clone(),
                side,
                from,
                to,
            })
            .await;
        TransitionReceipt {
            order_id,
            side,
            from,
            to,
        }
    }
}
