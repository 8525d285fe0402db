//! # Market Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{CorrelationId, OrderId, OrderState, Side};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarketEvent {
    // =========================================================================
    // ORDER GATEWAY
    // =========================================================================
    /// An order's new state was committed to its store.
    #[serde(rename_all = "camelCase")]
    OrderTransitioned {
        order_id: OrderId,
        side: Side,
        from: OrderState,
        to: OrderState,
    },

    // =========================================================================
    // MODERATOR DISCOVERY
    // =========================================================================
    /// One moderator decoded by an asynchronous search.
    #[serde(rename_all = "camelCase")]
    ModeratorFound {
        /// Same id the search acknowledged with.
        correlation_id: CorrelationId,
        /// Decoded identity digest.
        moderator: String,
    },

    /// The lookup behind an asynchronous search was exhausted.
    #[serde(rename_all = "camelCase")]
    ModeratorSearchFinished {
        correlation_id: CorrelationId,
        delivered: usize,
    },
}

impl MarketEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::OrderTransitioned { .. } => EventTopic::Orders,
            Self::ModeratorFound { .. } | Self::ModeratorSearchFinished { .. } => {
                EventTopic::Moderators
            }
        }
    }

    /// Correlation id for events that belong to an asynchronous search.
    #[must_use]
    pub fn correlation_id(&self) -> Option<CorrelationId> {
        match self {
            Self::ModeratorFound { correlation_id, .. }
            | Self::ModeratorSearchFinished { correlation_id, .. } => Some(*correlation_id),
            Self::OrderTransitioned { .. } => None,
        }
    }

    /// Payload pushed to WebSocket subscribers.
    ///
    /// Discovery results keep the `{"id", "moderator"}` shape existing
    /// clients already parse.
    #[must_use]
    pub fn to_client_json(&self) -> serde_json::Value {
        match self {
            Self::ModeratorFound {
                correlation_id,
                moderator,
            } => serde_json::json!({
                "id": correlation_id.to_string(),
                "moderator": moderator,
            }),
            other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Order lifecycle transitions.
    Orders,
    /// Moderator discovery results.
    Moderators,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Restrict to one asynchronous search.
    pub correlation_id: Option<CorrelationId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            correlation_id: None,
        }
    }

    /// Create a filter for the results of one search.
    #[must_use]
    pub fn search(correlation_id: CorrelationId) -> Self {
        Self {
            topics: vec![EventTopic::Moderators],
            correlation_id: Some(correlation_id),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &MarketEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let search_match = match self.correlation_id {
            None => true,
            Some(id) => event.correlation_id() == Some(id),
        };

        topic_match && search_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition() -> MarketEvent {
        MarketEvent::OrderTransitioned {
            order_id: OrderId::from("QmOrder"),
            side: Side::Sale,
            from: OrderState::Pending,
            to: OrderState::Confirmed,
        }
    }

    #[test]
    fn test_event_topic_mapping() {
        assert_eq!(transition().topic(), EventTopic::Orders);
        let found = MarketEvent::ModeratorFound {
            correlation_id: CorrelationId::new(),
            moderator: "ab".into(),
        };
        assert_eq!(found.topic(), EventTopic::Moderators);
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Moderators]);
        assert!(!filter.matches(&transition()));
        assert!(EventFilter::all().matches(&transition()));
    }

    #[test]
    fn test_filter_by_search() {
        let mine = CorrelationId::new();
        let filter = EventFilter::search(mine);

        let hit = MarketEvent::ModeratorFound {
            correlation_id: mine,
            moderator: "aa".into(),
        };
        let miss = MarketEvent::ModeratorFound {
            correlation_id: CorrelationId::new(),
            moderator: "bb".into(),
        };
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
        assert!(!filter.matches(&transition()));
    }

    #[test]
    fn test_client_json_shape() {
        let id = CorrelationId::new();
        let event = MarketEvent::ModeratorFound {
            correlation_id: id,
            moderator: "deadbeef".into(),
        };
        let json = event.to_client_json();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["moderator"], "deadbeef");

        let json = transition().to_client_json();
        assert_eq!(json["type"], "orderTransitioned");
        assert_eq!(json["to"], "CONFIRMED");
    }
}
