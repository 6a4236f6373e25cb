//! Refund HTTP handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::domain::RefundDecision;
use crate::interfaces::http::common::{ok, ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// Request a refund for a completed or cancelled reservation
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/refund",
    tag = "Refunds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = RequestRefundRequest,
    responses(
        (status = 201, description = "Refund requested", body = ApiResponse<RefundDto>),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation neither completed nor cancelled")
    )
)]
pub async fn request_refund(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(reservation_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RequestRefundRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RefundDto>>), ApiError> {
    let refund = state
        .services
        .refunds
        .request(&ctx, reservation_id, request.reason)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(refund.into()))))
}

/// Refunds requested by the caller
#[utoipa::path(
    get,
    path = "/api/v1/refunds",
    tag = "Refunds",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's refunds", body = ApiResponse<Vec<RefundDto>>)
    )
)]
pub async fn list_refunds(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<Vec<RefundDto>> {
    let refunds = state.services.refunds.list(&ctx).await?;
    ok(refunds.into_iter().map(RefundDto::from).collect())
}

/// Approve or reject a pending refund
///
/// Approval marks the reservation's completed payment as refunded.
#[utoipa::path(
    post,
    path = "/api/v1/refunds/{id}/decision",
    tag = "Refunds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Refund ID")),
    request_body = DecideRefundRequest,
    responses(
        (status = 200, description = "Refund decided", body = ApiResponse<RefundDto>),
        (status = 401, description = "Not the requester"),
        (status = 404, description = "Refund not found"),
        (status = 422, description = "Already decided or nothing left to refund")
    )
)]
pub async fn decide_refund(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(refund_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<DecideRefundRequest>,
) -> ApiResult<RefundDto> {
    let decision = request.decision.trim().parse::<RefundDecision>()?;
    let refund = state
        .services
        .refunds
        .decide(&ctx, refund_id, decision)
        .await?;
    ok(refund.into())
}
