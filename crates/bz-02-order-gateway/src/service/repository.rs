//! One logical order repository over the purchase and sale stores.

use crate::domain::{GatewayError, LocatedOrder};
use crate::ports::OrderStore;
use shared_types::{OrderId, Side};
use std::sync::Arc;

pub(crate) const ORDER_NOT_FOUND: &str = "order not found";

pub(crate) struct OrderRepository {
    purchases: Arc<dyn OrderStore>,
    sales: Arc<dyn OrderStore>,
}

impl OrderRepository {
    pub(crate) fn new(purchases: Arc<dyn OrderStore>, sales: Arc<dyn OrderStore>) -> Self {
        Self { purchases, sales }
    }

    pub(crate) fn store(&self, side: Side) -> &dyn OrderStore {
        match side {
            Side::Purchase => self.purchases.as_ref(),
            Side::Sale => self.sales.as_ref(),
        }
    }

    /// Try each side in order; the first store holding the id wins.
    pub(crate) async fn find(
        &self,
        order_id: &OrderId,
        sides: &[Side],
    ) -> Result<Option<LocatedOrder>, GatewayError> {
        for side in sides {
            if let Some(record) = self.store(*side).get_by_order_id(order_id).await? {
                return Ok(Some(LocatedOrder {
                    side: *side,
                    record,
                }));
            }
        }
        Ok(None)
    }

    pub(crate) async fn locate(
        &self,
        order_id: &OrderId,
        sides: &[Side],
    ) -> Result<LocatedOrder, GatewayError> {
        self.find(order_id, sides)
            .await?
            .ok_or_else(|| GatewayError::NotFound(ORDER_NOT_FOUND.to_string()))
    }
}
