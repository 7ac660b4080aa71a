//! Bookings repository

use crate::{
    error::{AppError, AppResult},
    models::Booking,
};

use super::db::Database;

#[derive(Clone)]
pub struct BookingsRepository {
    db: Database,
}

impl BookingsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Booking> {
        self.db
            .collections()
            .bookings
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// List all bookings, most recent start first
    pub async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> =
            self.db.collections().bookings.read().await.values().cloned().collect();
        bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(bookings)
    }

    /// List bookings made by one user, most recent start first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .db
            .collections()
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.is_owned_by(user_id))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(bookings)
    }

    /// Bookings that reserve the equipment's window (APPROVED or ACTIVE) —
    /// the set the overlap validator scans
    pub async fn list_blocking_for_equipment(&self, equipment_id: &str) -> AppResult<Vec<Booking>> {
        Ok(self
            .db
            .collections()
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.equipment_id == equipment_id && b.status.blocks_window())
            .cloned()
            .collect())
    }

    /// Insert a new booking
    pub async fn insert(&self, booking: Booking) -> AppResult<Booking> {
        let mut bookings = self.db.collections().bookings.write().await;
        bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    /// Replace a booking record (copy-and-swap transition commit)
    pub async fn update(&self, booking: Booking) -> AppResult<Booking> {
        let mut bookings = self.db.collections().bookings.write().await;
        if !bookings.contains_key(&booking.id) {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                booking.id
            )));
        }
        bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }
}
