//! Equipment repository

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{EquipmentQuery, UpdateEquipment},
        Equipment, EquipmentStatus,
    },
};

use super::db::Database;

#[derive(Clone)]
pub struct EquipmentRepository {
    db: Database,
}

impl EquipmentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.db
            .collections()
            .equipment
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// List equipment with optional name/code search and status filter,
    /// sorted by code
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let equipment = self.db.collections().equipment.read().await;
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let mut items: Vec<Equipment> = equipment
            .values()
            .filter(|e| match &needle {
                Some(n) => e.name.to_lowercase().contains(n) || e.code.to_lowercase().contains(n),
                None => true,
            })
            .filter(|e| match query.status {
                Some(status) => e.status == status,
                None => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(items)
    }

    /// Insert new equipment; fails on a duplicate inventory code
    pub async fn insert(&self, item: Equipment) -> AppResult<Equipment> {
        let mut equipment = self.db.collections().equipment.write().await;
        if equipment.values().any(|e| e.code == item.code) {
            return Err(AppError::Validation(format!(
                "Equipment code {} already exists",
                item.code
            )));
        }
        equipment.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    /// Apply a partial update to identity fields
    pub async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut equipment = self.db.collections().equipment.write().await;
        let item = equipment
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))?;

        if let Some(name) = &data.name {
            item.name = name.clone();
        }
        if let Some(model) = &data.model {
            item.model = Some(model.clone());
        }
        if let Some(serial) = &data.serial {
            item.serial = Some(serial.clone());
        }
        if let Some(manager_id) = &data.manager_id {
            item.manager_id = manager_id.clone();
        }
        if let Some(location) = &data.location {
            item.location = location.clone();
        }
        if let Some(is_restricted) = data.is_restricted {
            item.is_restricted = is_restricted;
        }
        if let Some(notes) = &data.notes {
            item.notes = Some(notes.clone());
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Set equipment status (engine side effect and admin override)
    pub async fn set_status(&self, id: &str, status: EquipmentStatus) -> AppResult<Equipment> {
        let mut equipment = self.db.collections().equipment.write().await;
        let item = equipment
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))?;
        item.status = status;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }
}
