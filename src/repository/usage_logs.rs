//! Usage logs repository

use crate::{
    error::{AppError, AppResult},
    models::{usage_log::CloseUsageLog, UsageLog},
};

use super::db::Database;

#[derive(Clone)]
pub struct UsageLogsRepository {
    db: Database,
}

impl UsageLogsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get usage log by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<UsageLog> {
        self.db
            .collections()
            .usage_logs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Usage log with id {} not found", id)))
    }

    /// The open (is_completed = false) log for an equipment, if any.
    /// The reconciler keeps this at most one.
    pub async fn find_open(&self, equipment_id: &str) -> AppResult<Option<UsageLog>> {
        Ok(self
            .db
            .collections()
            .usage_logs
            .read()
            .await
            .values()
            .find(|l| l.equipment_id == equipment_id && !l.is_completed)
            .cloned())
    }

    /// Usage history of one equipment, most recent first
    pub async fn list_for_equipment(&self, equipment_id: &str) -> AppResult<Vec<UsageLog>> {
        let mut logs: Vec<UsageLog> = self
            .db
            .collections()
            .usage_logs
            .read()
            .await
            .values()
            .filter(|l| l.equipment_id == equipment_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(logs)
    }

    /// Open a new log
    pub async fn insert(&self, log: UsageLog) -> AppResult<UsageLog> {
        let mut logs = self.db.collections().usage_logs.write().await;
        logs.insert(log.id.clone(), log.clone());
        Ok(log)
    }

    /// Close a log, recording the post-use condition
    pub async fn close(&self, id: &str, fields: CloseUsageLog) -> AppResult<UsageLog> {
        let mut logs = self.db.collections().usage_logs.write().await;
        let log = logs
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Usage log with id {} not found", id)))?;
        log.end_time = Some(fields.end_time);
        log.post_condition = Some(fields.post_condition);
        log.post_images = fields.post_images;
        log.notes = fields.notes;
        log.is_completed = true;
        Ok(log.clone())
    }
}
