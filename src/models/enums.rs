//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Staff,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Staff => "STAFF",
            UserRole::Student => "STUDENT",
        }
    }

    /// Whether this role may approve, reject, check out or check in bookings
    /// on behalf of other users.
    pub fn is_operator(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Staff)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "STAFF" => Ok(UserRole::Staff),
            "STUDENT" => Ok(UserRole::Student),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment lifecycle status
///
/// AVAILABLE / BOOKED / IN_USE are derived from the booking and usage-log
/// collections; BROKEN / MAINTENANCE / LIQUIDATED are set administratively
/// and stick until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Available,
    InUse,
    Booked,
    Broken,
    Maintenance,
    Liquidated,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "AVAILABLE",
            EquipmentStatus::InUse => "IN_USE",
            EquipmentStatus::Booked => "BOOKED",
            EquipmentStatus::Broken => "BROKEN",
            EquipmentStatus::Maintenance => "MAINTENANCE",
            EquipmentStatus::Liquidated => "LIQUIDATED",
        }
    }

    /// Statuses that are held manually rather than derived from bookings.
    pub fn is_manual(&self) -> bool {
        matches!(
            self,
            EquipmentStatus::Broken | EquipmentStatus::Maintenance | EquipmentStatus::Liquidated
        )
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(EquipmentStatus::Available),
            "IN_USE" => Ok(EquipmentStatus::InUse),
            "BOOKED" => Ok(EquipmentStatus::Booked),
            "BROKEN" => Ok(EquipmentStatus::Broken),
            "MAINTENANCE" => Ok(EquipmentStatus::Maintenance),
            "LIQUIDATED" => Ok(EquipmentStatus::Liquidated),
            other => Err(format!("Unknown equipment status: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Active,
    Completed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Terminal statuses permit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Rejected
        )
    }

    /// Statuses that reserve the equipment's time window: only these
    /// participate in overlap detection.
    pub fn blocks_window(&self) -> bool {
        matches!(self, BookingStatus::Approved | BookingStatus::Active)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Equipment condition captured on checkout (pre) and checkin (post)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Good,
    Worn,
    Damaged,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Good => "GOOD",
            Condition::Worn => "WORN",
            Condition::Damaged => "DAMAGED",
        }
    }

    /// A damaged checkin pulls the equipment out of service and counts a
    /// violation against the borrower.
    pub fn is_damage(&self) -> bool {
        matches!(self, Condition::Damaged)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&UserRole::Student).unwrap();
        assert_eq!(json, "\"STUDENT\"");
        let back: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserRole::Student);
    }

    #[test]
    fn equipment_status_uses_screaming_case() {
        let json = serde_json::to_string(&EquipmentStatus::InUse).unwrap();
        assert_eq!(json, "\"IN_USE\"");
        assert_eq!("in_use".parse::<EquipmentStatus>().unwrap(), EquipmentStatus::InUse);
    }

    #[test]
    fn terminal_statuses() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
        assert!(!BookingStatus::Active.is_terminal());
    }

    #[test]
    fn only_approved_and_active_block_the_window() {
        assert!(BookingStatus::Approved.blocks_window());
        assert!(BookingStatus::Active.blocks_window());
        assert!(!BookingStatus::Pending.blocks_window());
        assert!(!BookingStatus::Completed.blocks_window());
        assert!(!BookingStatus::Cancelled.blocks_window());
        assert!(!BookingStatus::Rejected.blocks_window());
    }

    #[test]
    fn damage_detection() {
        assert!(Condition::Damaged.is_damage());
        assert!(!Condition::Good.is_damage());
        assert!(!Condition::Worn.is_damage());
    }
}
