//! Data models for LabBook

pub mod booking;
pub mod enums;
pub mod equipment;
pub mod usage_log;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails};
pub use enums::{BookingStatus, Condition, EquipmentStatus, UserRole};
pub use equipment::{Equipment, EquipmentDetails};
pub use usage_log::UsageLog;
pub use user::{User, UserShort};
