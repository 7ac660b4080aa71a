//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, equipment, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LabBook API",
        version = "1.0.0",
        description = "Lab Equipment Booking System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::list_usage_logs,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::override_status,
        equipment::liquidate_equipment,
        // Bookings
        bookings::list_bookings,
        bookings::create_booking,
        bookings::get_booking,
        bookings::approve_booking,
        bookings::reject_booking,
        bookings::checkout_booking,
        bookings::checkin_booking,
        bookings::cancel_booking,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::lock_user,
        users::unlock_user,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::UserRole,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::BookingStatus,
            crate::models::enums::Condition,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::OverrideStatusRequest,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::BookingDetails,
            bookings::RejectRequest,
            bookings::CheckoutRequest,
            bookings::CheckinRequest,
            // Usage logs
            crate::models::usage_log::UsageLog,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            // Health
            health::HealthResponse,
            health::ReadyResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
