//! User listing (admin)

use axum::extract::{Query, State};

use crate::interfaces::http::common::{
    ok, ApiResponse, ApiResult, PaginatedResponse, PaginationQuery,
};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::modules::auth::UserDto;
use crate::interfaces::http::router::AppState;

/// List users (admin)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Users, newest first", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let page = state
        .services
        .identity
        .list_users(&ctx, query.params())
        .await?;
    ok(PaginatedResponse::from_result(page, UserDto::from))
}
