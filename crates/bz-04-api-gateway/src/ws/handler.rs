//! WebSocket push channel.
//!
//! Every client receives every bus event rendered with
//! [`MarketEvent::to_client_json`](shared_bus::MarketEvent::to_client_json).
//! Clients match asynchronous search results by the `id` field. Inbound
//! frames other than close are ignored.

use crate::middleware::GatewayMetrics;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_types::CorrelationId;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// WebSocket connection handler
pub struct WebSocketHandler {
    bus: Arc<InMemoryEventBus>,
    metrics: Arc<GatewayMetrics>,
    connection_id: CorrelationId,
}

impl WebSocketHandler {
    pub fn new(bus: Arc<InMemoryEventBus>, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            bus,
            metrics,
            connection_id: CorrelationId::new(),
        }
    }

    /// Forward bus events to `socket` until either side closes.
    pub async fn handle(self, socket: WebSocket) {
        info!(connection_id = %self.connection_id, "New WebSocket connection");
        self.metrics.record_ws_connect();

        let mut events = self.bus.event_stream(EventFilter::all());
        let (mut sender, mut receiver) = socket.split();

        loop {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else { break };
                    let payload = event.to_client_json().to_string();
                    if let Err(e) = sender.send(Message::Text(payload)).await {
                        debug!(connection_id = %self.connection_id, error = %e, "Client went away");
                        break;
                    }
                    self.metrics.record_ws_message();
                }
                inbound = receiver.next() => {
                    match inbound {
                        None | Some(Ok(Message::Close(_))) => break,
                        Some(Err(e)) => {
                            warn!(connection_id = %self.connection_id, error = %e, "WebSocket receive error");
                            break;
                        }
                        Some(Ok(_)) => {}
                    }
                }
            }
        }

        self.metrics.record_ws_disconnect();
        info!(connection_id = %self.connection_id, "WebSocket connection closed");
    }
}
