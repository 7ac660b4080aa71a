//! User model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::UserRole;

/// A registered user of the lab
///
/// Owned by the identity store; the booking engine only reads role and lock
/// state, and increments the violation counter on damaged checkins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub department: String,
    pub violation_count: u32,
    pub is_locked: bool,
}

/// Compact user representation for embedding in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub department: String,
}

impl From<&User> for UserShort {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            department: user.department.clone(),
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    #[validate(length(min = 1, max = 200))]
    pub department: String,
}
