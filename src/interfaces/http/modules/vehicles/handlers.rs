//! Vehicle HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::domain::Location;
use crate::interfaces::http::common::{
    ok, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::router::AppState;

/// Vehicles currently available
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Available vehicles", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles(State(state): State<AppState>) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state.services.fleet.list_available().await?;
    ok(vehicles.into_iter().map(VehicleDto::from).collect())
}

/// Register a vehicle (admin)
#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    let vehicle = state
        .services
        .fleet
        .add_vehicle(&ctx, request.into_domain()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(vehicle.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle with its insurances", body = ApiResponse<VehicleDetailsDto>),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<VehicleDetailsDto> {
    let details = state.services.fleet.get_vehicle(id).await?;
    ok(details.into())
}

/// Delete a vehicle (admin); refused once the vehicle has bookings
#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle has reservations")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<EmptyData> {
    state.services.fleet.delete_vehicle(&ctx, id).await?;
    ok(EmptyData {})
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/search",
    tag = "Vehicles",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching vehicles", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Unknown vehicle type or location")
    )
)]
pub async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state.services.fleet.search(query.into_domain()?).await?;
    ok(vehicles.into_iter().map(VehicleDto::from).collect())
}

/// Available vehicles suited to a terrain
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/terrain/{location}",
    tag = "Vehicles",
    params(("location" = String, Path, description = "city, mountains, desert or snow")),
    responses(
        (status = 200, description = "Available vehicles suited to the terrain", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Unknown location")
    )
)]
pub async fn vehicles_for_terrain(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> ApiResult<Vec<VehicleDto>> {
    let location = location.parse::<Location>().map_err(ApiError::from)?;
    let vehicles = state.services.fleet.by_terrain(location).await?;
    ok(vehicles.into_iter().map(VehicleDto::from).collect())
}

/// Check a vehicle against an inclusive date interval
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}/availability",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Availability and conflicting reservations", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "End date before start date"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityDto> {
    let availability = state
        .services
        .reservations
        .check_availability(id, query.start_date, query.end_date)
        .await?;
    ok(availability.into())
}

/// Return a vehicle from maintenance (admin)
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/clear-maintenance",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle back in the bookable pool", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn clear_maintenance(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<VehicleDto> {
    let vehicle = state.services.fleet.clear_maintenance(&ctx, id).await?;
    ok(vehicle.into())
}

/// Attach an insurance policy (admin)
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/insurances",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = CreateInsuranceRequest,
    responses(
        (status = 201, description = "Insurance attached", body = ApiResponse<InsuranceDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn add_insurance(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateInsuranceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InsuranceDto>>), ApiError> {
    let insurance = state
        .services
        .fleet
        .add_insurance(&ctx, request.into_domain(id)?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(insurance.into()))))
}

/// Add a vehicle to the caller's favorites
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/{id}/favorite",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 201, description = "Vehicle saved to favorites", body = ApiResponse<FavoriteDto>),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Already a favorite")
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ApiResponse<FavoriteDto>>), ApiError> {
    let favorite = state.services.fleet.add_favorite(&ctx, id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(favorite.into()))))
}

/// The caller's favorite vehicles
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's favorites", body = ApiResponse<Vec<FavoriteDto>>)
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> ApiResult<Vec<FavoriteDto>> {
    let favorites = state.services.fleet.list_favorites(&ctx).await?;
    ok(favorites.into_iter().map(FavoriteDto::from).collect())
}
