//! Usage log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::Condition;

/// One checkout/checkin cycle of an equipment
///
/// An open log (is_completed = false) means the equipment is currently
/// checked out; at most one log per equipment may be open.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageLog {
    pub id: String,
    /// Booking that produced this log; ad-hoc staff checkouts may omit it
    pub booking_id: Option<String>,
    pub equipment_id: String,
    pub user_id: Option<String>,
    pub guest_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub purpose: String,
    pub pre_condition: Condition,
    pub post_condition: Option<Condition>,
    pub pre_images: Vec<String>,
    pub post_images: Vec<String>,
    pub notes: Option<String>,
    pub is_completed: bool,
}

/// Fields recorded when closing a usage log
#[derive(Debug, Clone)]
pub struct CloseUsageLog {
    pub end_time: DateTime<Utc>,
    pub post_condition: Condition,
    pub post_images: Vec<String>,
    pub notes: Option<String>,
}
