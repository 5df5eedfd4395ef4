/*
 * Responsibility
 * - GET /orders/{order_id}
 * - 閲覧可否の判定は OrderAccessGuard に任せ、handler は DTO への変換だけ
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{dto::orders::OrderResponse, extractors::CallerClaims},
    error::AppError,
    state::AppState,
};

pub async fn find_order(
    State(state): State<AppState>,
    CallerClaims(claims): CallerClaims,
    Path(order_id): Path<i64>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.guard.authorize_view(order_id, &claims).await?;

    Ok(Json(OrderResponse::try_from(order)?))
}
