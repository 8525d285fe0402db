//! Moderator discovery and self-registration endpoints.

use super::{empty, parse_body, query_flag};
use crate::domain::ApiError;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bz_03_moderator_discovery::ModeratorInfo;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct ModeratorsQuery {
    #[serde(rename = "async")]
    pub asynchronous: Option<String>,
}

/// `GET /ob/moderators`
///
/// Without `async` the response is the full list. With it the response is
/// `202 {"id": ...}` and results arrive over `/ws` tagged with that id,
/// never ahead of the acknowledgment.
pub async fn get_moderators(
    State(state): State<AppState>,
    Query(query): Query<ModeratorsQuery>,
) -> Result<Response, ApiError> {
    if query_flag(query.asynchronous.as_deref()) {
        let search = state.moderators.discover_async();
        let id = search.id();
        debug!(correlation_id = %id, "Asynchronous moderator search acknowledged");
        let body = serde_json::json!({ "id": id.to_string() });
        let mut response = (StatusCode::ACCEPTED, Json(body)).into_response();
        // Results stream once the server drops the response head.
        response.extensions_mut().insert(search);
        return Ok(response);
    }

    let found: Vec<String> = state
        .moderators
        .discover()
        .await?
        .into_iter()
        .map(|m| m.into_string())
        .collect();
    Ok(Json(found).into_response())
}

/// `PUT /ob/moderator`
pub async fn register_moderator(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let info: ModeratorInfo = parse_body(&body)?;
    state.moderators.register_self(info).await?;
    Ok(empty())
}

/// `DELETE /ob/moderator`
pub async fn unregister_moderator(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.moderators.unregister_self().await?;
    Ok(empty())
}
