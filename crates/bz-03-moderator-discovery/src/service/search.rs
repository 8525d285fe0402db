//! Background search task for asynchronous discovery.

use crate::domain::moderator_from_record;
use crate::ports::PointerLookup;
use shared_bus::{EventPublisher, MarketEvent};
use shared_types::CorrelationId;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Drain one streamed lookup, publishing each decoded moderator.
///
/// A lookup that fails to start is logged and publishes nothing. Nothing
/// is published before `released` resolves.
pub(super) async fn run_search(
    lookup: Arc<dyn PointerLookup>,
    events: Arc<dyn EventPublisher>,
    pointer: String,
    max_results: usize,
    correlation_id: CorrelationId,
    released: oneshot::Receiver<()>,
) {
    let mut results = match lookup.find_pointers_stream(&pointer, max_results).await {
        Ok(rx) => rx,
        Err(e) => {
            warn!(correlation_id = %correlation_id, error = %e, "Moderator search failed to start");
            return;
        }
    };

    // Resolves (as closed) once every acknowledgment clone is gone.
    let _ = released.await;

    let mut delivered = 0;
    while delivered < max_results {
        let Some(record) = results.recv().await else {
            break;
        };
        let Some(moderator) = moderator_from_record(&record) else {
            continue;
        };
        events
            .publish(MarketEvent::ModeratorFound {
                correlation_id,
                moderator: moderator.into_string(),
            })
            .await;
        delivered += 1;
    }

    debug!(correlation_id = %correlation_id, delivered, "Moderator search finished");
    events
        .publish(MarketEvent::ModeratorSearchFinished {
            correlation_id,
            delivered,
        })
        .await;
}
