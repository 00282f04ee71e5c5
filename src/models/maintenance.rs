//! Modelos de mantenimiento
//!
//! Plantillas de mantenimiento (datos estáticos) y tareas concretas por
//! vehículo. El intervalo se modela como enum para que una plantilla de tipo
//! `mileage` no pueda existir sin millas, ni una `time` sin meses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categoría de mantenimiento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    OilChange,
    TireRotation,
    BrakeInspection,
    FluidCheck,
    FilterReplacement,
    Battery,
    Inspection,
    Other,
}

/// Tipo de intervalo tal como viaja en las filas del backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    Mileage,
    Time,
    Both,
}

/// Prioridad de una tarea
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Intervalo de recurrencia de una tarea
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "intervalType", rename_all = "lowercase")]
pub enum Interval {
    Mileage {
        #[serde(rename = "intervalMileage")]
        miles: u32,
    },
    Time {
        #[serde(rename = "intervalMonths")]
        months: u32,
    },
    Both {
        #[serde(rename = "intervalMileage")]
        miles: u32,
        #[serde(rename = "intervalMonths")]
        months: u32,
    },
}

impl Interval {
    pub fn interval_type(&self) -> IntervalType {
        match self {
            Interval::Mileage { .. } => IntervalType::Mileage,
            Interval::Time { .. } => IntervalType::Time,
            Interval::Both { .. } => IntervalType::Both,
        }
    }

    /// Millas del intervalo, si el intervalo las usa
    pub fn miles(&self) -> Option<u32> {
        match *self {
            Interval::Mileage { miles } | Interval::Both { miles, .. } => Some(miles),
            Interval::Time { .. } => None,
        }
    }

    /// Meses del intervalo, si el intervalo los usa
    pub fn months(&self) -> Option<u32> {
        match *self {
            Interval::Time { months } | Interval::Both { months, .. } => Some(months),
            Interval::Mileage { .. } => None,
        }
    }

    /// Reconstruir el intervalo desde la forma plana de una fila.
    /// Devuelve `None` si los campos no concuerdan con el tipo.
    pub fn from_parts(
        interval_type: IntervalType,
        miles: Option<u32>,
        months: Option<u32>,
    ) -> Option<Self> {
        match (interval_type, miles, months) {
            (IntervalType::Mileage, Some(miles), None) if miles > 0 => {
                Some(Interval::Mileage { miles })
            }
            (IntervalType::Time, None, Some(months)) if months > 0 => {
                Some(Interval::Time { months })
            }
            (IntervalType::Both, Some(miles), Some(months)) if miles > 0 && months > 0 => {
                Some(Interval::Both { miles, months })
            }
            _ => None,
        }
    }
}

/// Entrada de la plantilla de mantenimiento por defecto
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduleItem {
    pub title: &'static str,
    pub description: &'static str,
    pub category: MaintenanceCategory,
    #[serde(flatten)]
    pub interval: Interval,
    pub priority: Priority,
}

/// Tarea de mantenimiento de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    #[serde(flatten)]
    pub interval: Interval,
    pub last_completed_mileage: Option<u32>,
    pub last_completed_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<u32>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
