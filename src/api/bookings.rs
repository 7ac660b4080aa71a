//! Booking lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{booking::CreateBooking, Booking, BookingDetails, Condition},
};

use super::CurrentUser;

/// Reject booking request
#[derive(Deserialize, ToSchema)]
pub struct RejectRequest {
    /// Reason shown to the requesting user
    pub reason: String,
}

/// Checkout request: pre-use condition record
#[derive(Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub pre_condition: Condition,
    #[serde(default)]
    pub pre_images: Vec<String>,
}

/// Checkin request: post-use condition record
#[derive(Deserialize, ToSchema)]
pub struct CheckinRequest {
    pub post_condition: Condition,
    #[serde(default)]
    pub post_images: Vec<String>,
    pub notes: Option<String>,
}

/// List bookings visible to the caller
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "Bookings visible to the caller", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list_for_actor(&actor).await?;
    Ok(Json(bookings))
}

/// Request a booking (registered user or guest identity in the payload)
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking requested", body = Booking),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "User is locked"),
        (status = 404, description = "Equipment or user not found"),
        (status = 409, description = "Window conflicts with an approved or active booking")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = state.services.bookings.request_booking(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Get one booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get(&actor, &id).await?;
    Ok(Json(booking))
}

/// Approve a pending booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/approve",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking approved", body = Booking),
        (status = 403, description = "Caller is not staff or admin"),
        (status = 409, description = "Window no longer available"),
        (status = 422, description = "Not a pending booking")
    )
)]
pub async fn approve_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.approve_booking(&actor, &id).await?;
    Ok(Json(booking))
}

/// Reject a pending booking with a reason
#[utoipa::path(
    post,
    path = "/bookings/{id}/reject",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Booking rejected", body = Booking),
        (status = 400, description = "Missing reason"),
        (status = 403, description = "Caller is not staff or admin"),
        (status = 422, description = "Not a pending booking")
    )
)]
pub async fn reject_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .reject_booking(&actor, &id, &request.reason)
        .await?;
    Ok(Json(booking))
}

/// Check out an approved booking, opening a usage log
#[utoipa::path(
    post,
    path = "/bookings/{id}/checkout",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checked out", body = Booking),
        (status = 403, description = "Not allowed, or before the booking start"),
        (status = 422, description = "Not an approved booking, or equipment in use")
    )
)]
pub async fn checkout_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .checkout(&actor, &id, request.pre_condition, request.pre_images)
        .await?;
    Ok(Json(booking))
}

/// Check in an active booking, closing its usage log
#[utoipa::path(
    post,
    path = "/bookings/{id}/checkin",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Checked in", body = Booking),
        (status = 403, description = "Caller is not staff or admin"),
        (status = 422, description = "No open usage log or invalid state")
    )
)]
pub async fn checkin_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<CheckinRequest>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .services
        .bookings
        .checkin(
            &actor,
            &id,
            request.post_condition,
            request.post_images,
            request.notes,
        )
        .await?;
    Ok(Json(booking))
}

/// Cancel a pending or approved booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 403, description = "Caller is neither the owner nor an admin"),
        (status = 422, description = "Booking is active or terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.cancel_booking(&actor, &id).await?;
    Ok(Json(booking))
}
