//! In-memory order and case stores.
//!
//! Used by the node runtime until a persistent store is wired, and by
//! tests.

use crate::domain::{CaseRecord, OrderRecord};
use crate::ports::{CaseStore, OrderStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{CollaboratorError, DisputeResolution, OrderId, OrderState};
use std::collections::HashMap;

fn missing(what: &str, order_id: &OrderId) -> CollaboratorError {
    CollaboratorError::new(format!("no {what} stored for {order_id}"))
}

/// Orders for one side, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, OrderRecord>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: OrderRecord) {
        self.orders.write().insert(record.order_id.clone(), record);
    }

    /// Set the funded flag, as payment detection would.
    pub fn set_funded(&self, order_id: &OrderId, funded: bool) -> bool {
        match self.orders.write().get_mut(order_id) {
            Some(record) => {
                record.funded = funded;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, order_id: &OrderId) -> Option<OrderRecord> {
        self.orders.read().get(order_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<OrderRecord>, CollaboratorError> {
        Ok(self.get(order_id))
    }

    async fn mark_as_read(&self, order_id: &OrderId) -> Result<(), CollaboratorError> {
        let mut orders = self.orders.write();
        let record = orders
            .get_mut(order_id)
            .ok_or_else(|| missing("order", order_id))?;
        record.read = true;
        Ok(())
    }

    async fn update_state(
        &self,
        order_id: &OrderId,
        state: OrderState,
    ) -> Result<(), CollaboratorError> {
        let mut orders = self.orders.write();
        let record = orders
            .get_mut(order_id)
            .ok_or_else(|| missing("order", order_id))?;
        record.state = state;
        record.read = false;
        Ok(())
    }
}

/// Dispute cases keyed by order id.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: RwLock<HashMap<OrderId, CaseRecord>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, case: CaseRecord) {
        self.cases.write().insert(case.order_id.clone(), case);
    }

    pub fn get(&self, order_id: &OrderId) -> Option<CaseRecord> {
        self.cases.read().get(order_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.cases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.read().is_empty()
    }

    fn with_case<F>(&self, order_id: &OrderId, f: F) -> Result<(), CollaboratorError>
    where
        F: FnOnce(&mut CaseRecord),
    {
        let mut cases = self.cases.write();
        let case = cases
            .get_mut(order_id)
            .ok_or_else(|| missing("case", order_id))?;
        f(case);
        Ok(())
    }
}

#[async_trait]
impl CaseStore for InMemoryCaseStore {
    async fn get_case(&self, order_id: &OrderId) -> Result<Option<CaseRecord>, CollaboratorError> {
        Ok(self.get(order_id))
    }

    async fn put_case(&self, case: CaseRecord) -> Result<(), CollaboratorError> {
        self.insert(case);
        Ok(())
    }

    async fn mark_as_read(&self, order_id: &OrderId) -> Result<(), CollaboratorError> {
        self.with_case(order_id, |case| case.read = true)
    }

    async fn record_resolution(
        &self,
        order_id: &OrderId,
        resolution: DisputeResolution,
    ) -> Result<(), CollaboratorError> {
        self.with_case(order_id, |case| {
            case.resolution = Some(resolution);
            case.state = OrderState::Decided;
            case.read = false;
        })
    }

    async fn update_state(
        &self,
        order_id: &OrderId,
        state: OrderState,
    ) -> Result<(), CollaboratorError> {
        self.with_case(order_id, |case| {
            case.state = state;
            case.read = false;
        })
    }
}
