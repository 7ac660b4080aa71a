//! Equipment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EquipmentStatus;
use super::user::UserShort;

/// A piece of lab equipment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    /// Inventory code, unique across the lab
    pub code: String,
    pub model: Option<String>,
    pub serial: Option<String>,
    /// User responsible for this equipment
    pub manager_id: String,
    pub location: String,
    pub status: EquipmentStatus,
    /// Restricted equipment requires SOP confirmation before booking
    pub is_restricted: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment with its manager resolved, returned by the detail endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub equipment: Equipment,
    /// Responsible user; None when the manager record no longer exists
    pub manager: Option<UserShort>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub manager_id: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default)]
    pub is_restricted: bool,
    pub notes: Option<String>,
}

/// Update equipment request (identity/status fields excluded; status changes
/// go through the dedicated status endpoint or the booking engine)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub manager_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    pub is_restricted: Option<bool>,
    pub notes: Option<String>,
}

/// Equipment list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentQuery {
    /// Case-insensitive substring match on name or code
    pub search: Option<String>,
    /// Filter on a single status
    pub status: Option<EquipmentStatus>,
}
