//! Static pointer lookup.
//!
//! Serves a fixed set of pointer records per key. Stands in for the DHT
//! when the node runs without a routing table, and in tests.

use crate::domain::PeerRecord;
use crate::ports::PointerLookup;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::CollaboratorError;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
pub struct StaticPointerLookup {
    records: RwLock<HashMap<String, Vec<PeerRecord>>>,
    /// Pause between streamed records, to mimic a live lookup.
    stream_delay: Option<Duration>,
    offline: bool,
}

impl StaticPointerLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stream_delay(mut self, delay: Duration) -> Self {
        self.stream_delay = Some(delay);
        self
    }

    /// A lookup whose every call fails.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Advertise `record` under `pointer`.
    pub fn add(&self, pointer: &str, record: PeerRecord) {
        self.records
            .write()
            .entry(pointer.to_string())
            .or_default()
            .push(record);
    }

    fn snapshot(&self, pointer: &str, max: usize) -> Result<Vec<PeerRecord>, CollaboratorError> {
        if self.offline {
            return Err(CollaboratorError::new("routing table unavailable"));
        }
        Ok(self
            .records
            .read()
            .get(pointer)
            .map(|r| r.iter().take(max).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl PointerLookup for StaticPointerLookup {
    async fn find_pointers(
        &self,
        pointer: &str,
        max: usize,
    ) -> Result<Vec<PeerRecord>, CollaboratorError> {
        self.snapshot(pointer, max)
    }

    async fn find_pointers_stream(
        &self,
        pointer: &str,
        max: usize,
    ) -> Result<mpsc::Receiver<PeerRecord>, CollaboratorError> {
        let records = self.snapshot(pointer, max)?;
        let delay = self.stream_delay;
        let (tx, rx) = mpsc::channel(records.len().max(1));

        tokio::spawn(async move {
            for record in records {
                if let Some(d) = delay {
                    tokio::time::sleep(d).await;
                }
                if tx.send(record).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}
