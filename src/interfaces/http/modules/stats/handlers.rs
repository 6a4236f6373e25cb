//! Statistics handler

use axum::extract::State;

use super::dto::FleetStatsDto;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// Fleet statistics (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    tag = "Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservation, revenue and damage totals", body = ApiResponse<FleetStatsDto>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn fleet_stats(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<FleetStatsDto> {
    let stats = state.services.reporting.stats(&ctx).await?;
    ok(stats.into())
}
