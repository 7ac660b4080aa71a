//! User management service (identity collaborator surface)

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{user::CreateUser, User, UserRole},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users (ADMIN)
    pub async fn list(&self, actor: &User) -> AppResult<Vec<User>> {
        require_admin(actor)?;
        self.repository.users.list().await
    }

    /// Register a user (ADMIN)
    pub async fn create(&self, actor: &User, data: CreateUser) -> AppResult<User> {
        require_admin(actor)?;
        data.validate()?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role,
            department: data.department,
            violation_count: 0,
            is_locked: false,
        };
        self.repository.users.insert(user).await
    }

    /// Lock or unlock a user account (ADMIN). Locked users cannot create
    /// bookings; existing bookings are left for staff to cancel.
    pub async fn set_locked(&self, actor: &User, id: &str, locked: bool) -> AppResult<User> {
        require_admin(actor)?;
        if actor.id == id {
            return Err(AppError::Validation(
                "Admins cannot lock their own account".to_string(),
            ));
        }
        let user = self.repository.users.set_locked(id, locked).await?;
        tracing::info!(user_id = %user.id, locked, "User lock state changed");
        Ok(user)
    }
}

fn require_admin(actor: &User) -> AppResult<()> {
    if actor.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins may manage users".to_string(),
        ));
    }
    Ok(())
}
