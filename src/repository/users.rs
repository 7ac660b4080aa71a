//! Users repository

use crate::{
    error::{AppError, AppResult},
    models::User,
};

use super::db::Database;

#[derive(Clone)]
pub struct UsersRepository {
    db: Database,
}

impl UsersRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.db
            .collections()
            .users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// List all users, sorted by name
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.db.collections().users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    /// Insert a new user
    pub async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.db.collections().users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Set the lock flag on a user account
    pub async fn set_locked(&self, id: &str, locked: bool) -> AppResult<User> {
        let mut users = self.db.collections().users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        user.is_locked = locked;
        Ok(user.clone())
    }

    /// Count one violation against a user (damaged checkin)
    pub async fn increment_violations(&self, id: &str) -> AppResult<User> {
        let mut users = self.db.collections().users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        user.violation_count += 1;
        Ok(user.clone())
    }
}
