//! REST handlers under `/ob`.
//!
//! Bodies are read as raw bytes and decoded here so a malformed payload
//! produces the gateway's own 400 body rather than axum's rejection text.

pub mod moderators;
pub mod orders;


use crate::domain::ApiError;
use axum::body::Bytes;
use axum::Json;
use serde::de::DeserializeOwned;

/// Decode a JSON request body.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Body returned by operations that produce no data.
pub(crate) fn empty() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// Lenient boolean query parameter: `1 t T TRUE true True` are true,
/// anything else (including absence) is false.
pub(crate) fn query_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "t" | "T" | "TRUE" | "true" | "True"))
}
