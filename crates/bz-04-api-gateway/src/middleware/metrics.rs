//! Request counters exposed at `GET /metrics`.

use crate::router::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// API gateway metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // Mutating (POST/PUT/DELETE) requests
    pub write_requests_total: AtomicU64,

    // WebSocket counters
    pub websocket_connections: AtomicU64,
    pub websocket_active: AtomicU64,
    pub websocket_messages_sent: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request
    pub fn record_request(&self, success: bool, is_write: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }
        if is_write {
            self.write_requests_total.fetch_add(1, Ordering::Relaxed);
        }
        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
    }

    pub fn record_ws_connect(&self) {
        self.websocket_connections.fetch_add(1, Ordering::Relaxed);
        self.websocket_active.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ws_disconnect(&self) {
        self.websocket_active.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn record_ws_message(&self) {
        self.websocket_messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn average_latency_ms(&self) -> u64 {
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0
        } else {
            self.total_latency_ms.load(Ordering::Relaxed) / count
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "writes": self.write_requests_total.load(Ordering::Relaxed),
            },
            "websocket": {
                "connections": self.websocket_connections.load(Ordering::Relaxed),
                "active": self.websocket_active.load(Ordering::Relaxed),
                "messages_sent": self.websocket_messages_sent.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    is_write: bool,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, is_write: bool) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            is_write,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.metrics
            .record_request(success, self.is_write, latency_ms);
    }
}

/// Middleware timing every request. Any status below 400 counts as success.
pub async fn track_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method();
    let is_write = !(method == axum::http::Method::GET || method == axum::http::Method::HEAD);
    let timer = RequestTimer::new(Arc::clone(&state.metrics), is_write);

    let response = next.run(request).await;
    timer.finish(!(response.status().is_client_error() || response.status().is_server_error()));
    response
}
