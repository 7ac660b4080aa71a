//! Equipment service

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, EquipmentQuery, UpdateEquipment},
        Equipment, EquipmentDetails, EquipmentStatus, User, UserShort,
    },
    repository::Repository,
};

use super::bookings::reconcile_equipment_status;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Equipment with its manager resolved for the detail view
    pub async fn get_details(&self, id: &str) -> AppResult<EquipmentDetails> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        let manager = self
            .repository
            .users
            .get_by_id(&equipment.manager_id)
            .await
            .ok()
            .map(|u| UserShort::from(&u));
        Ok(EquipmentDetails { equipment, manager })
    }

    /// Register new equipment (ADMIN)
    pub async fn create(&self, actor: &User, data: CreateEquipment) -> AppResult<Equipment> {
        require_admin(actor)?;
        data.validate()?;
        // Manager must be a known user
        self.repository.users.get_by_id(&data.manager_id).await?;

        let now = Utc::now();
        let item = Equipment {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            code: data.code,
            model: data.model,
            serial: data.serial,
            manager_id: data.manager_id,
            location: data.location,
            status: EquipmentStatus::Available,
            is_restricted: data.is_restricted,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };
        self.repository.equipment.insert(item).await
    }

    /// Update equipment identity fields (ADMIN)
    pub async fn update(&self, actor: &User, id: &str, data: UpdateEquipment) -> AppResult<Equipment> {
        require_admin(actor)?;
        data.validate()?;
        if let Some(manager_id) = &data.manager_id {
            self.repository.users.get_by_id(manager_id).await?;
        }
        self.repository.equipment.update(id, &data).await
    }

    /// Liquidate equipment (ADMIN). The record stays resolvable for booking
    /// and usage history; LIQUIDATED equipment cannot be booked again.
    /// Refused while the equipment still has reserved windows or an open log.
    pub async fn liquidate(&self, actor: &User, id: &str) -> AppResult<Equipment> {
        require_admin(actor)?;

        let _guard = self.repository.db.lock_equipment(id).await;
        self.repository.equipment.get_by_id(id).await?;

        if !self
            .repository
            .bookings
            .list_blocking_for_equipment(id)
            .await?
            .is_empty()
        {
            return Err(AppError::InvalidTransition(
                "Equipment still has approved or active bookings".to_string(),
            ));
        }
        if self.repository.usage_logs.find_open(id).await?.is_some() {
            return Err(AppError::InvalidTransition(
                "Equipment is currently checked out".to_string(),
            ));
        }

        self.repository
            .equipment
            .set_status(id, EquipmentStatus::Liquidated)
            .await
    }

    /// Manual status override (ADMIN): AVAILABLE, BROKEN or MAINTENANCE.
    /// IN_USE and BOOKED are derived from logs/bookings and cannot be set
    /// directly; liquidation goes through `liquidate`.
    pub async fn override_status(
        &self,
        actor: &User,
        id: &str,
        status: EquipmentStatus,
    ) -> AppResult<Equipment> {
        require_admin(actor)?;

        match status {
            EquipmentStatus::Available | EquipmentStatus::Broken | EquipmentStatus::Maintenance => {}
            other => {
                return Err(AppError::Validation(format!(
                    "Status {} cannot be set manually",
                    other
                )));
            }
        }

        let _guard = self.repository.db.lock_equipment(id).await;
        if self.repository.usage_logs.find_open(id).await?.is_some() {
            return Err(AppError::InvalidTransition(
                "Equipment is currently checked out; check it in first".to_string(),
            ));
        }

        self.repository.equipment.set_status(id, status).await?;
        // Clearing a held status hands control back to the booking engine,
        // which may report BOOKED for a window covering now.
        reconcile_equipment_status(&self.repository, id).await
    }
}

fn require_admin(actor: &User) -> AppResult<()> {
    if actor.role != crate::models::UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins may manage equipment".to_string(),
        ));
    }
    Ok(())
}
