//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BookingStatus;

/// A booking of one equipment for a half-open time window [start_time, end_time)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: String,
    pub equipment_id: String,
    /// Registered requester; guest bookings leave this empty and fill the
    /// guest identity fields instead.
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub user_code: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: BookingStatus,
    pub sop_confirmed: bool,
    pub approver_name: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking was made by the given user.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }
}

/// Booking creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: String,
    pub user_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub guest_name: Option<String>,
    pub user_code: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 1000))]
    pub purpose: String,
    #[serde(default)]
    pub sop_confirmed: bool,
}

/// Booking decorated with equipment identification for list views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub equipment_name: String,
    pub equipment_code: String,
}
