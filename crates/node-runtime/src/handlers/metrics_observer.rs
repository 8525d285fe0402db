//! Bus observer that turns market events into Prometheus counters.

use bazaar_telemetry::{log_order_event, BazaarMetrics};
use shared_bus::{EventFilter, MarketEvent, Subscription};
use tokio::sync::watch;
use tracing::{debug, info};

/// Consumes every bus event until shutdown or until the bus closes.
pub struct MetricsObserver {
    subscription: Subscription,
    metrics: BazaarMetrics,
}

impl MetricsObserver {
    pub fn new(subscription: Subscription, metrics: BazaarMetrics) -> Self {
        Self {
            subscription,
            metrics,
        }
    }

    /// Subscription filter the observer expects.
    pub fn filter() -> EventFilter {
        EventFilter::all()
    }

    pub fn observe(&self, event: &MarketEvent) {
        match event {
            MarketEvent::OrderTransitioned {
                order_id,
                side,
                from,
                to,
            } => {
                self.metrics
                    .order_transitions
                    .with_label_values(&[to.as_str()])
                    .inc();
                log_order_event!(
                    debug,
                    "order-gateway",
                    "Transition observed",
                    order_id,
                    side = %side,
                    from = %from,
                    to = %to
                );
            }
            MarketEvent::ModeratorFound { .. } => {
                self.metrics.moderators_discovered.inc();
            }
            MarketEvent::ModeratorSearchFinished {
                correlation_id,
                delivered,
            } => {
                debug!(correlation_id = %correlation_id, delivered, "Moderator search finished");
            }
        }
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                event = self.subscription.recv() => {
                    match event {
                        Some(event) => self.observe(&event),
                        None => break,
                    }
                }
                _ = shutdown.changed() => {
                    info!("[metrics] Shutdown signal received");
                    break;
                }
            }
        }
    }
}
