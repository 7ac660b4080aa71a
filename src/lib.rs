//! LabBook - Lab Equipment Booking System
//!
//! A REST JSON API server for browsing lab equipment, requesting bookings,
//! and tracking checkouts through usage logs. The booking lifecycle engine
//! enforces overlap-free APPROVED/ACTIVE windows per equipment and keeps
//! equipment status consistent with bookings and open usage logs.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
