//! Reservation HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::interfaces::http::common::{
    ok, ApiError, ApiResponse, ApiResult, BookingConflictBody, EmptyData, PaginatedResponse,
    PaginationQuery, ValidatedJson,
};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// Book a vehicle for an inclusive date interval
///
/// 409 with the conflicting reservations when the interval is taken.
#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid dates or tier"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Interval overlaps existing reservations", body = ApiResponse<BookingConflictBody>)
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let reservation = state
        .services
        .reservations
        .create(&ctx, request.into_command()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(reservation.into()))))
}

/// The caller's reservations
#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's reservations with payment state", body = ApiResponse<Vec<ReservationViewDto>>)
    )
)]
pub async fn list_my_reservations(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<Vec<ReservationViewDto>> {
    let views = state.services.reservations.list_for_user(&ctx).await?;
    ok(views.into_iter().map(ReservationViewDto::from).collect())
}

/// Every reservation with payment and damage flags (admin)
#[utoipa::path(
    get,
    path = "/api/v1/reservations/all",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "All reservations", body = ApiResponse<PaginatedResponse<ReservationOverviewDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_all_reservations(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<PaginatedResponse<ReservationOverviewDto>> {
    let page = state
        .services
        .reservations
        .list_all(&ctx, query.params())
        .await?;
    ok(PaginatedResponse::from_result(page, ReservationOverviewDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<ReservationDto> {
    let reservation = state.services.reservations.get(&ctx, id).await?;
    ok(reservation.into())
}

/// Cancel a pending or confirmed reservation
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Already cancelled or completed")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<ReservationDto> {
    let reservation = state.services.reservations.cancel(&ctx, id).await?;
    ok(reservation.into())
}

/// Move a reservation through its status machine (admin)
#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/status",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin only"),
        (status = 422, description = "Transition not allowed")
    )
)]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<ReservationDto> {
    let reservation = state
        .services
        .reservations
        .update_status(&ctx, id, &request.status)
        .await?;
    ok(reservation.into())
}

/// Delete a reservation (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation and its payment and damage records deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<EmptyData> {
    state.services.reservations.delete(&ctx, id).await?;
    ok(EmptyData {})
}
