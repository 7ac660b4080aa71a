//! Usage log queries
//!
//! Logs are opened and closed by the booking engine; this service only
//! exposes them for display (equipment detail pages).

use crate::{error::AppResult, models::UsageLog, repository::Repository};

#[derive(Clone)]
pub struct UsageLogsService {
    repository: Repository,
}

impl UsageLogsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Usage history of one equipment, most recent first
    pub async fn list_for_equipment(&self, equipment_id: &str) -> AppResult<Vec<UsageLog>> {
        // Resolve the equipment first so unknown ids surface as NotFound
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.usage_logs.list_for_equipment(equipment_id).await
    }
}
