//! Order and dispute lifecycle endpoints.

use super::{empty, parse_body};
use crate::domain::ApiError;
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use bz_02_order_gateway::{
    CaseRecord, CloseDisputeRequest, ConfirmRequest, OpenDisputeRequest, OrderFulfillment,
    OrderIdRequest, OrderRatings, OrderView,
};
use shared_types::OrderId;

type Empty = Json<serde_json::Value>;

pub async fn confirm_order(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: ConfirmRequest = parse_body(&body)?;
    state.orders.confirm_order(req).await?;
    Ok(empty())
}

pub async fn cancel_order(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: OrderIdRequest = parse_body(&body)?;
    state.orders.cancel_order(req).await?;
    Ok(empty())
}

pub async fn fulfill_order(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: OrderFulfillment = parse_body(&body)?;
    state.orders.fulfill_order(req).await?;
    Ok(empty())
}

pub async fn complete_order(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Empty, ApiError> {
    let req: OrderRatings = parse_body(&body)?;
    state.orders.complete_order(req).await?;
    Ok(empty())
}

pub async fn open_dispute(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: OpenDisputeRequest = parse_body(&body)?;
    state.orders.open_dispute(req).await?;
    Ok(empty())
}

pub async fn close_dispute(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: CloseDisputeRequest = parse_body(&body)?;
    state.orders.close_dispute(req).await?;
    Ok(empty())
}

pub async fn release_funds(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: OrderIdRequest = parse_body(&body)?;
    state.orders.release_funds(req).await?;
    Ok(empty())
}

pub async fn refund_order(State(state): State<AppState>, body: Bytes) -> Result<Empty, ApiError> {
    let req: OrderIdRequest = parse_body(&body)?;
    state.orders.refund_order(req).await?;
    Ok(empty())
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderView>, ApiError> {
    let view = state.orders.get_order(&OrderId::new(order_id)).await?;
    Ok(Json(view))
}

pub async fn get_case(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CaseRecord>, ApiError> {
    let case = state.orders.get_case(&OrderId::new(order_id)).await?;
    Ok(Json(case))
}
