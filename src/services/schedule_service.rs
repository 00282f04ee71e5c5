//! Instanciación del calendario de mantenimiento
//!
//! Convierte la plantilla en tareas concretas para un vehículo y recalcula
//! los vencimientos cuando se registra un servicio.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{MaintenanceScheduleItem, MaintenanceTask};

/// Días por mes. Aproximación fija: no sigue el calendario real.
pub const DAYS_PER_MONTH: i64 = 30;

/// Duración de un intervalo en meses con la aproximación de 30 días
pub fn months_to_duration(months: u32) -> Duration {
    Duration::days(i64::from(months) * DAYS_PER_MONTH)
}

/// Próximo vencimiento en millas a partir de un odómetro
pub fn next_due_mileage(from_mileage: u32, interval_miles: Option<u32>) -> Option<u32> {
    interval_miles.map(|miles| from_mileage.saturating_add(miles))
}

/// Próximo vencimiento en fecha a partir de un instante
pub fn next_due_date(from: DateTime<Utc>, interval_months: Option<u32>) -> Option<DateTime<Utc>> {
    interval_months.map(|months| from + months_to_duration(months))
}

/// Crear una tarea por entrada de la plantilla.
///
/// Las tareas nacen con `is_overdue = false` aunque la aritmética diga otra
/// cosa: un vehículo recién añadido no tiene tareas vencidas.
pub fn instantiate_schedule(
    template: &[MaintenanceScheduleItem],
    vehicle_id: Uuid,
    current_mileage: u32,
    created_at: DateTime<Utc>,
) -> Vec<MaintenanceTask> {
    template
        .iter()
        .map(|item| MaintenanceTask {
            id: Uuid::new_v4(),
            vehicle_id,
            title: item.title.to_string(),
            description: item.description.to_string(),
            category: item.category,
            interval: item.interval,
            last_completed_mileage: None,
            last_completed_date: None,
            next_due_mileage: next_due_mileage(current_mileage, item.interval.miles()),
            next_due_date: next_due_date(created_at, item.interval.months()),
            is_overdue: false,
            priority: item.priority,
            created_at,
            updated_at: created_at,
        })
        .collect()
}

/// Registrar que una tarea se realizó a cierto odómetro e instante
pub fn complete_task(
    task: &MaintenanceTask,
    completed_mileage: u32,
    completed_at: DateTime<Utc>,
) -> MaintenanceTask {
    MaintenanceTask {
        last_completed_mileage: Some(completed_mileage),
        last_completed_date: Some(completed_at),
        next_due_mileage: next_due_mileage(completed_mileage, task.interval.miles()),
        next_due_date: next_due_date(completed_at, task.interval.months()),
        is_overdue: false,
        updated_at: completed_at,
        ..task.clone()
    }
}
