//! Business logic services

pub mod bookings;
pub mod equipment;
pub mod usage_logs;
pub mod users;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub bookings: bookings::BookingsService,
    pub equipment: equipment::EquipmentService,
    pub users: users::UsersService,
    pub usage_logs: usage_logs::UsageLogsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            bookings: bookings::BookingsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            usage_logs: usage_logs::UsageLogsService::new(repository),
        }
    }
}
