//! Per-order serialisation of mutating operations.

use dashmap::DashMap;
use shared_types::OrderId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async mutexes keyed by order id, created on demand.
///
/// An entry lives only while some task holds or waits for it.
#[derive(Debug, Default)]
pub(crate) struct OrderLocks {
    locks: DashMap<OrderId, Arc<Mutex<()>>>,
}

impl OrderLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `order_id`.
    pub(crate) async fn acquire(&self, order_id: &OrderId) -> OrderGuard<'_> {
        let lock = Arc::clone(&*self.locks.entry(order_id.clone()).or_default());
        let guard = lock.lock_owned().await;
        OrderGuard {
            owner: self,
            order_id: order_id.clone(),
            guard: Some(guard),
        }
    }

    /// Number of ids currently held or awaited.
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}

pub(crate) struct OrderGuard<'a> {
    owner: &'a OrderLocks,
    order_id: OrderId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for OrderGuard<'_> {
    fn drop(&mut self) {
        // Release first so the count below sees only waiters.
        drop(self.guard.take());
        self.owner
            .locks
            .remove_if(&self.order_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
