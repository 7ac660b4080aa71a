//! In-memory keyed store shared by all repositories
//!
//! Stands in for the external storage collaborator: one authoritative
//! instance is created at startup and handed to `Repository::new`. Records
//! are replaced whole under the collection write lock, so readers never see
//! a half-applied transition.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::models::{Booking, Equipment, UsageLog, User};

#[derive(Default)]
pub(crate) struct Collections {
    pub users: RwLock<HashMap<String, User>>,
    pub equipment: RwLock<HashMap<String, Equipment>>,
    pub bookings: RwLock<HashMap<String, Booking>>,
    pub usage_logs: RwLock<HashMap<String, UsageLog>>,
    /// Lazily populated registry of per-equipment write locks
    equipment_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Handle to the shared in-memory store
#[derive(Clone, Default)]
pub struct Database {
    inner: Arc<Collections>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn collections(&self) -> &Collections {
        &self.inner
    }

    /// Serialize state-changing operations on one equipment.
    ///
    /// Approve, checkout, checkin and cancel must hold this guard while they
    /// validate and commit, so two concurrent approvals cannot both pass the
    /// overlap scan before either writes.
    pub async fn lock_equipment(&self, equipment_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.equipment_locks.lock().await;
            locks
                .entry(equipment_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
