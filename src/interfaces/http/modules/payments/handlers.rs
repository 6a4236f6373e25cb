//! Payment HTTP handlers

use axum::extract::{Path, State};
use axum::Json;

use super::dto::*;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// Pay for a reservation
///
/// 422 when the reservation is cancelled or already paid.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/payment",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PaymentReceiptDto>),
        (status = 400, description = "Unknown payment method"),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Cancelled or already paid")
    )
)]
pub async fn process_payment(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(reservation_id): Path<i32>,
    Json(request): Json<ProcessPaymentRequest>,
) -> ApiResult<PaymentReceiptDto> {
    let method = request.method()?;
    let receipt = state
        .services
        .payments
        .process(&ctx, reservation_id, method)
        .await?;
    ok(receipt.into())
}

/// Caller's payment history
#[utoipa::path(
    get,
    path = "/api/v1/payments/history",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's payments", body = ApiResponse<Vec<PaymentDto>>)
    )
)]
pub async fn payment_history(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<Vec<PaymentDto>> {
    let payments = state.services.payments.history(&ctx).await?;
    ok(payments.into_iter().map(PaymentDto::from).collect())
}
