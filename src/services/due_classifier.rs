//! Clasificación de tareas en vencidas y próximas
//!
//! Función pura de (ahora, odómetro actual, tarea). Se recalcula en cada
//! lectura; el flag persistido no se usa para decidir.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::MaintenanceTask;

/// Tareas ya clasificadas y ordenadas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedTasks {
    pub overdue: Vec<MaintenanceTask>,
    pub upcoming: Vec<MaintenanceTask>,
}

impl ClassifiedTasks {
    /// La tarea más urgente: primera vencida, si no la primera próxima
    pub fn most_urgent(&self) -> Option<&MaintenanceTask> {
        self.overdue.first().or_else(|| self.upcoming.first())
    }

    /// Conservar solo las primeras `limit` tareas en orden global
    pub fn truncate(&mut self, limit: usize) {
        self.overdue.truncate(limit);
        let remaining = limit.saturating_sub(self.overdue.len());
        self.upcoming.truncate(remaining);
    }
}

/// Una tarea vence si el odómetro alcanzó su kilometraje o si ya pasó su fecha.
/// Sin odómetro conocido solo cuenta la fecha.
pub fn is_overdue(task: &MaintenanceTask, current_mileage: Option<u32>, now: DateTime<Utc>) -> bool {
    let mileage_reached = match (task.next_due_mileage, current_mileage) {
        (Some(due), Some(current)) => current >= due,
        _ => false,
    };
    let date_reached = task.next_due_date.map_or(false, |due| now >= due);

    mileage_reached || date_reached
}

/// Valores ausentes al final
fn cmp_nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orden de presentación: vencidas primero, luego por millas de vencimiento
/// ascendentes (ausentes al final) y después por fecha de vencimiento.
pub fn compare_tasks(a: &MaintenanceTask, b: &MaintenanceTask) -> Ordering {
    b.is_overdue
        .cmp(&a.is_overdue)
        .then_with(|| cmp_nulls_last(&a.next_due_mileage, &b.next_due_mileage))
        .then_with(|| cmp_nulls_last(&a.next_due_date, &b.next_due_date))
}

/// Ordenar usando el flag `is_overdue` ya recalculado. Orden estable.
pub fn sort_tasks(tasks: &mut [MaintenanceTask]) {
    tasks.sort_by(compare_tasks);
}

/// Recalcular `is_overdue` de cada tarea con el odómetro de su vehículo,
/// ordenar y separar en vencidas y próximas.
pub fn classify_tasks(
    tasks: Vec<MaintenanceTask>,
    mileage_by_vehicle: &HashMap<Uuid, u32>,
    now: DateTime<Utc>,
) -> ClassifiedTasks {
    let mut tasks: Vec<MaintenanceTask> = tasks
        .into_iter()
        .map(|mut task| {
            let current = mileage_by_vehicle.get(&task.vehicle_id).copied();
            task.is_overdue = is_overdue(&task, current, now);
            task
        })
        .collect();

    sort_tasks(&mut tasks);

    let (overdue, upcoming) = tasks.into_iter().partition(|t| t.is_overdue);
    ClassifiedTasks { overdue, upcoming }
}
