//! API handlers for the LabBook REST endpoints

pub mod bookings;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::User, AppState};

/// Name of the header carrying the caller's opaque user id.
///
/// The session layer is out of scope here; the surrounding deployment is
/// expected to authenticate the caller and forward their id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor resolving the calling user through the identity store
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Forbidden("Missing x-user-id header".to_string()))?;

        let user = state
            .services
            .users
            .get_by_id(user_id)
            .await
            .map_err(|_| AppError::Forbidden(format!("Unknown user id {}", user_id)))?;

        Ok(CurrentUser(user))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route("/equipment", get(equipment::list_equipment))
        .route("/equipment", post(equipment::create_equipment))
        .route("/equipment/:id", get(equipment::get_equipment))
        .route("/equipment/:id", put(equipment::update_equipment))
        .route("/equipment/:id/status", put(equipment::override_status))
        .route("/equipment/:id/liquidate", post(equipment::liquidate_equipment))
        .route("/equipment/:id/logs", get(equipment::list_usage_logs))
        // Bookings
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/approve", post(bookings::approve_booking))
        .route("/bookings/:id/reject", post(bookings::reject_booking))
        .route("/bookings/:id/checkout", post(bookings::checkout_booking))
        .route("/bookings/:id/checkin", post(bookings::checkin_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        // Users
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/lock", post(users::lock_user))
        .route("/users/:id/unlock", post(users::unlock_user))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
