//! Authentication API handlers

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserDto};
use crate::interfaces::http::common::{ok, ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::{CurrentUser, MaybeAuth};
use crate::interfaces::http::router::AppState;

/// Exchange email and password for a JWT
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "JWT issued", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state
        .services
        .identity
        .login(&request.email, &request.password)
        .await?;
    ok(result.into())
}

/// Register a user
///
/// Clients may register anonymously; creating an admin needs an admin token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only admins may create admins"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    MaybeAuth(caller): MaybeAuth,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let registration = request.into_registration()?;
    let user = state
        .services
        .identity
        .register(caller.as_ref(), registration)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<UserDto> {
    let user = state.services.identity.current_user(&ctx).await?;
    ok(user.into())
}
