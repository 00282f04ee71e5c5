use serde::Serialize;

use crate::models::{MaintenanceTask, Vehicle};

// Response del dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Vehículo más reciente del usuario
    pub primary_vehicle: Option<Vehicle>,
    pub vehicles: Vec<Vehicle>,
    pub overdue_tasks: Vec<MaintenanceTask>,
    pub upcoming_tasks: Vec<MaintenanceTask>,
    pub most_urgent_task: Option<MaintenanceTask>,
}
