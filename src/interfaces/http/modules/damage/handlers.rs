//! Damage report HTTP handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::interfaces::http::common::{ok, ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// File a damage report against one of the caller's reservations
///
/// The vehicle goes to maintenance.
#[utoipa::path(
    post,
    path = "/api/v1/damage-reports",
    tag = "Damage Reports",
    security(("bearer_auth" = [])),
    request_body = CreateDamageReportRequest,
    responses(
        (status = 201, description = "Damage reported; vehicle moved to maintenance", body = ApiResponse<DamageReportDto>),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation is cancelled")
    )
)]
pub async fn report_damage(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateDamageReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DamageReportDto>>), ApiError> {
    let report = state.services.damage.report(&ctx, request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(report.into()))))
}

/// List all damage reports (admin)
#[utoipa::path(
    get,
    path = "/api/v1/damage-reports",
    tag = "Damage Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All damage reports", body = ApiResponse<Vec<DamageReportDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_damage_reports(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<Vec<DamageReportDto>> {
    let reports = state.services.damage.list(&ctx).await?;
    ok(reports.into_iter().map(DamageReportDto::from).collect())
}

/// Update a damage report (admin)
#[utoipa::path(
    patch,
    path = "/api/v1/damage-reports/{id}",
    tag = "Damage Reports",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Damage report ID")),
    request_body = UpdateDamageReportRequest,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<DamageReportDto>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn update_damage_report(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateDamageReportRequest>,
) -> ApiResult<DamageReportDto> {
    let report = state
        .services
        .damage
        .update(&ctx, id, request.into_domain()?)
        .await?;
    ok(report.into())
}
