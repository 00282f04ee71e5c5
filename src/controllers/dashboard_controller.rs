use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::dto::dashboard_dto::DashboardResponse;
use crate::models::{AuthenticatedUser, MaintenanceTask};
use crate::repositories::{TaskStore, VehicleStore};
use crate::services::classify_tasks;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    vehicles: Arc<dyn VehicleStore>,
    tasks: Arc<dyn TaskStore>,
    task_limit: usize,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            tasks: state.tasks.clone(),
            task_limit: state.config.dashboard_task_limit,
        }
    }

    pub async fn get(&self, user: &AuthenticatedUser, now: DateTime<Utc>) -> AppResult<DashboardResponse> {
        let vehicles = self.vehicles.list_by_user(user.user_id, &user.access_token).await?;

        // Una consulta de tareas por vehículo, en paralelo
        let fetches = vehicles
            .iter()
            .map(|vehicle| self.tasks.list_for_vehicle(vehicle.id, &user.access_token));
        let results = join_all(fetches).await;

        let mut all_tasks: Vec<MaintenanceTask> = Vec::new();
        for (vehicle, result) in vehicles.iter().zip(results) {
            match result {
                Ok(tasks) => all_tasks.extend(tasks),
                Err(e) => warn!("⚠️ No se pudieron cargar las tareas de {}: {}", vehicle.id, e),
            }
        }

        let mileage: HashMap<_, _> = vehicles.iter().map(|v| (v.id, v.mileage)).collect();
        let mut classified = classify_tasks(all_tasks, &mileage, now);
        classified.truncate(self.task_limit);
        debug!(
            "📊 Dashboard de {}: {} vehículos, {} vencidas, {} próximas",
            user.user_id,
            vehicles.len(),
            classified.overdue.len(),
            classified.upcoming.len()
        );

        Ok(DashboardResponse {
            primary_vehicle: vehicles.first().cloned(),
            most_urgent_task: classified.most_urgent().cloned(),
            vehicles,
            overdue_tasks: classified.overdue,
            upcoming_tasks: classified.upcoming,
        })
    }
}
