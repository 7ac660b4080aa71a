//! Repository layer over the shared in-memory store

pub mod bookings;
pub mod db;
pub mod equipment;
pub mod seed;
pub mod usage_logs;
pub mod users;

pub use db::Database;

/// Main repository struct holding the shared store handle
#[derive(Clone)]
pub struct Repository {
    pub db: Database,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub bookings: bookings::BookingsRepository,
    pub usage_logs: usage_logs::UsageLogsRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(db: Database) -> Self {
        Self {
            users: users::UsersRepository::new(db.clone()),
            equipment: equipment::EquipmentRepository::new(db.clone()),
            bookings: bookings::BookingsRepository::new(db.clone()),
            usage_logs: usage_logs::UsageLogsRepository::new(db.clone()),
            db,
        }
    }
}
