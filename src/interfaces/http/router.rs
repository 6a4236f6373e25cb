//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::RentalServices;
use crate::infrastructure::crypto::JwtConfig;
use crate::interfaces::http::common::{
    ApiResponse, BookingConflictBody, EmptyData, PaginatedResponse,
};
use crate::interfaces::http::middleware::{auth_middleware, optional_auth_middleware, AuthState};

use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{
    auth, damage, health, payments, refunds, reservations, stats, users, vehicles,
};

/// State shared by every resource handler
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<RentalServices>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        crate::interfaces::http::modules::metrics::prometheus_metrics,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        users::list_users,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::create_vehicle,
        vehicles::search_vehicles,
        vehicles::vehicles_for_terrain,
        vehicles::get_vehicle,
        vehicles::delete_vehicle,
        vehicles::check_availability,
        vehicles::clear_maintenance,
        vehicles::add_insurance,
        vehicles::add_favorite,
        vehicles::list_favorites,
        // Reservations
        reservations::create_reservation,
        reservations::list_my_reservations,
        reservations::list_all_reservations,
        reservations::get_reservation,
        reservations::cancel_reservation,
        reservations::update_reservation_status,
        reservations::delete_reservation,
        // Payments and refunds
        payments::process_payment,
        payments::payment_history,
        refunds::request_refund,
        refunds::list_refunds,
        refunds::decide_refund,
        // Damage and oversight
        damage::report_damage,
        damage::list_damage_reports,
        damage::update_damage_report,
        stats::fleet_stats,
    ),
    components(
        schemas(
            // Common
            ApiResponse<EmptyData>,
            EmptyData,
            BookingConflictBody,
            PaginatedResponse<reservations::ReservationOverviewDto>,
            PaginatedResponse<auth::UserDto>,
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserDto,
            // Vehicles
            vehicles::CreateVehicleRequest,
            vehicles::VehicleDto,
            vehicles::VehicleDetailsDto,
            vehicles::AvailabilityDto,
            vehicles::CreateInsuranceRequest,
            vehicles::InsuranceDto,
            vehicles::FavoriteDto,
            // Reservations
            reservations::CreateReservationRequest,
            reservations::UpdateStatusRequest,
            reservations::ReservationDto,
            reservations::ReservationViewDto,
            reservations::ReservationOverviewDto,
            reservations::PaymentSummaryDto,
            // Payments and refunds
            payments::ProcessPaymentRequest,
            payments::PaymentDto,
            payments::PaymentReceiptDto,
            refunds::RequestRefundRequest,
            refunds::DecideRefundRequest,
            refunds::RefundDto,
            // Damage and oversight
            damage::CreateDamageReportRequest,
            damage::UpdateDamageReportRequest,
            damage::DamageReportDto,
            stats::FleetStatsDto,
            stats::TopVehicleDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health and Prometheus metrics"),
        (name = "Authentication", description = "Login (JWT), registration and the current user"),
        (name = "Users", description = "User administration"),
        (name = "Vehicles", description = "Fleet registry, search, availability, insurance and favorites"),
        (name = "Reservations", description = "Booking lifecycle: create, cancel, status transitions"),
        (name = "Payments", description = "Reservation payments and payment history"),
        (name = "Refunds", description = "Refund requests and decisions"),
        (name = "Damage Reports", description = "Damage reporting and repair tracking"),
        (name = "Statistics", description = "Fleet oversight totals"),
    ),
    info(
        title = "Fleet Rental API",
        version = "1.0.0",
        description = "REST API for booking and managing rental vehicles",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    services: Arc<RentalServices>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    metrics_handle: PrometheusHandle,
) -> Router {
    let state = AppState {
        services,
        db,
        started_at: Arc::new(Instant::now()),
    };
    let auth_state = AuthState { jwt_config };

    // Anonymous access allowed; a presented token is still verified
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            optional_auth_middleware,
        ))
        .with_state(state.clone());

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route("/search", get(vehicles::search_vehicles))
        .route("/terrain/{location}", get(vehicles::vehicles_for_terrain))
        .route(
            "/{id}",
            get(vehicles::get_vehicle).delete(vehicles::delete_vehicle),
        )
        .route("/{id}/availability", get(vehicles::check_availability))
        .route("/{id}/clear-maintenance", post(vehicles::clear_maintenance))
        .route("/{id}/insurances", post(vehicles::add_insurance))
        .route("/{id}/favorite", post(vehicles::add_favorite))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            optional_auth_middleware,
        ))
        .with_state(state.clone());

    // Everything below requires a bearer token
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_my_reservations).post(reservations::create_reservation),
        )
        .route("/all", get(reservations::list_all_reservations))
        .route(
            "/{id}",
            get(reservations::get_reservation).delete(reservations::delete_reservation),
        )
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route("/{id}/status", put(reservations::update_reservation_status))
        .route("/{id}/payment", post(payments::process_payment))
        .route("/{id}/refund", post(refunds::request_refund));

    let account_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/favorites", get(vehicles::list_favorites))
        .route("/payments/history", get(payments::payment_history))
        .route("/refunds", get(refunds::list_refunds))
        .route("/refunds/{id}/decision", post(refunds::decide_refund))
        .route(
            "/damage-reports",
            get(damage::list_damage_reports).post(damage::report_damage),
        )
        .route(
            "/damage-reports/{id}",
            patch(damage::update_damage_report),
        )
        .route("/admin/stats", get(stats::fleet_stats));

    let protected_routes = Router::new()
        .nest("/reservations", reservation_routes)
        .merge(account_routes)
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: metrics_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(metrics_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1", protected_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
