use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::mapping::{task_to_domain, task_to_persistence, MaintenanceTaskRow};
use super::{TaskStore, MAINTENANCE_TASKS_TABLE};
use crate::clients::{Query, SupabaseRestClient};
use crate::models::MaintenanceTask;
use crate::utils::errors::{not_found_error, AppResult};

pub struct MaintenanceTaskRepository {
    client: SupabaseRestClient,
}

impl MaintenanceTaskRepository {
    pub fn new(client: SupabaseRestClient) -> Self {
        Self { client }
    }
}

fn rows_to_domain(rows: Vec<MaintenanceTaskRow>) -> AppResult<Vec<MaintenanceTask>> {
    Ok(rows
        .into_iter()
        .map(task_to_domain)
        .collect::<Result<Vec<_>, _>>()?)
}

#[async_trait]
impl TaskStore for MaintenanceTaskRepository {
    async fn insert_batch(&self, tasks: &[MaintenanceTask], access_token: &str) -> AppResult<usize> {
        if tasks.is_empty() {
            return Ok(0);
        }

        let rows: Vec<MaintenanceTaskRow> = tasks.iter().map(task_to_persistence).collect();
        let created: Vec<MaintenanceTaskRow> = self
            .client
            .insert(MAINTENANCE_TASKS_TABLE, rows.as_slice(), access_token)
            .await?;

        debug!("📦 {} tareas insertadas", created.len());
        Ok(created.len())
    }

    async fn list_for_vehicle(&self, vehicle_id: Uuid, access_token: &str) -> AppResult<Vec<MaintenanceTask>> {
        let query = Query::new().eq("vehicle_id", vehicle_id);
        let rows: Vec<MaintenanceTaskRow> = self
            .client
            .select(MAINTENANCE_TASKS_TABLE, &query, access_token)
            .await?;

        rows_to_domain(rows)
    }

    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<MaintenanceTask>> {
        let row: Option<MaintenanceTaskRow> = self
            .client
            .select_one(MAINTENANCE_TASKS_TABLE, &Query::new().eq("id", id), access_token)
            .await?;

        Ok(row.map(task_to_domain).transpose()?)
    }

    async fn update(&self, task: &MaintenanceTask, access_token: &str) -> AppResult<MaintenanceTask> {
        let row = task_to_persistence(task);
        let rows: Vec<MaintenanceTaskRow> = self
            .client
            .update(MAINTENANCE_TASKS_TABLE, &Query::new().eq("id", task.id), &row, access_token)
            .await?;

        rows_to_domain(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| not_found_error("Maintenance task", &task.id.to_string()))
    }

    async fn delete_for_vehicle(&self, vehicle_id: Uuid, access_token: &str) -> AppResult<()> {
        self.client
            .delete(MAINTENANCE_TASKS_TABLE, &Query::new().eq("vehicle_id", vehicle_id), access_token)
            .await?;
        Ok(())
    }
}
