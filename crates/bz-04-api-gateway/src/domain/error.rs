//! API error type and its HTTP rendering.
//!
//! Every failure leaves the gateway as `{"success": false, "reason": "..."}`
//! with a status chosen from the error category:
//!
//! | Category | Status |
//! |----------|--------|
//! | not found (order or case) | 404 |
//! | invalid state, precondition, validation, policy, malformed JSON | 400 |
//! | conflict | 409 |
//! | internal | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bz_02_order_gateway::{ErrorKind, GatewayError};
use bz_03_moderator_discovery::DiscoveryError;
use std::fmt;

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub reason: String,
}

impl ApiError {
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    /// Request body or query could not be decoded.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, reason)
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, reason)
    }

    /// Reason as written to the wire. Double quotes become single quotes.
    pub fn wire_reason(&self) -> String {
        self.reason.replace('"', "'")
    }

    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "reason": self.wire_reason(),
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.reason)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Status for each order gateway error category.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound | ErrorKind::NotFoundCase => StatusCode::NOT_FOUND,
        ErrorKind::InvalidState
        | ErrorKind::PreconditionFailed
        | ErrorKind::ValidationFailed
        | ErrorKind::PolicyViolation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::new(status_for(err.kind()), err.to_string())
    }
}

impl From<DiscoveryError> for ApiError {
    fn from(err: DiscoveryError) -> Self {
        let status = match &err {
            DiscoveryError::ProfileMissing => StatusCode::CONFLICT,
            DiscoveryError::InvalidModeratorInfo(_) => StatusCode::BAD_REQUEST,
            DiscoveryError::LookupFailed(_)
            | DiscoveryError::Storage(_)
            | DiscoveryError::FollowIndex(_)
            | DiscoveryError::Announce(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_statuses() {
        let cases = [
            (GatewayError::NotFound("order not found".into()), 404),
            (GatewayError::NotFoundCase("case not found".into()), 404),
            (GatewayError::InvalidState("x".into()), 400),
            (GatewayError::PreconditionFailed("x".into()), 400),
            (GatewayError::ValidationFailed("x".into()), 400),
            (GatewayError::PolicyViolation("x".into()), 400),
            (GatewayError::Conflict("x".into()), 409),
            (GatewayError::Internal("x".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status.as_u16(), status);
        }
    }

    #[test]
    fn test_discovery_error_statuses() {
        assert_eq!(
            ApiError::from(DiscoveryError::ProfileMissing).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(DiscoveryError::InvalidModeratorInfo("no fee".into())).status,
            StatusCode::BAD_REQUEST
        );
        let err = ApiError::from(DiscoveryError::Announce("timeout".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason, "IPNS Error: timeout");
    }

    #[test]
    fn test_body_replaces_double_quotes() {
        let err = ApiError::bad_request(r#"unknown field "orderID""#);
        assert_eq!(
            err.body(),
            serde_json::json!({"success": false, "reason": "unknown field 'orderID'"})
        );
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::from(parse).status, StatusCode::BAD_REQUEST);
    }
}
