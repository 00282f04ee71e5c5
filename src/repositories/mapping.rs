//! Traducción entre filas del backend (snake_case) y el dominio (camelCase)
//!
//! Dos funciones puras por entidad: `*_to_domain` y `*_to_persistence`.
//! Ningún otro módulo renombra campos a mano.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Interval, IntervalType, MaintenanceCategory, MaintenanceTask, Priority, User, Vehicle,
};

#[derive(Error, Debug, PartialEq)]
pub enum MappingError {
    #[error("maintenance task {id} has an inconsistent interval ({interval_type:?}, mileage {mileage:?}, months {months:?})")]
    InconsistentInterval {
        id: Uuid,
        interval_type: IntervalType,
        mileage: Option<u32>,
        months: Option<u32>,
    },

    #[error("vehicle {id} has a negative mileage ({mileage})")]
    NegativeMileage { id: Uuid, mileage: i64 },
}

/// Fila de la tabla `users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fila de la tabla `vehicles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
    pub mileage: i64,
    pub nickname: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila de la tabla `maintenance_tasks`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceTaskRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub interval_type: IntervalType,
    pub interval_mileage: Option<u32>,
    pub interval_months: Option<u32>,
    #[serde(default)]
    pub last_completed_mileage: Option<u32>,
    #[serde(default)]
    pub last_completed_date: Option<DateTime<Utc>>,
    pub next_due_mileage: Option<u32>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn user_to_domain(row: UserRow) -> User {
    User {
        id: row.id,
        email: row.email,
        is_premium: row.is_premium,
        created_at: row.created_at,
    }
}

pub fn user_to_persistence(user: &User) -> UserRow {
    UserRow {
        id: user.id,
        email: user.email.clone(),
        is_premium: user.is_premium,
        premium_expires_at: None,
        created_at: user.created_at,
        updated_at: None,
    }
}

pub fn vehicle_to_domain(row: VehicleRow) -> Result<Vehicle, MappingError> {
    let mileage = u32::try_from(row.mileage).map_err(|_| MappingError::NegativeMileage {
        id: row.id,
        mileage: row.mileage,
    })?;

    Ok(Vehicle {
        id: row.id,
        user_id: row.user_id,
        make: row.make,
        model: row.model,
        year: row.year,
        vin: row.vin,
        trim: row.trim,
        mileage,
        nickname: row.nickname,
        photo_url: row.photo_url,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub fn vehicle_to_persistence(vehicle: &Vehicle) -> VehicleRow {
    VehicleRow {
        id: vehicle.id,
        user_id: vehicle.user_id,
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        year: vehicle.year,
        vin: vehicle.vin.clone(),
        trim: vehicle.trim.clone(),
        mileage: i64::from(vehicle.mileage),
        nickname: vehicle.nickname.clone(),
        photo_url: vehicle.photo_url.clone(),
        created_at: vehicle.created_at,
        updated_at: vehicle.updated_at,
    }
}

pub fn task_to_domain(row: MaintenanceTaskRow) -> Result<MaintenanceTask, MappingError> {
    let interval = Interval::from_parts(row.interval_type, row.interval_mileage, row.interval_months)
        .ok_or(MappingError::InconsistentInterval {
            id: row.id,
            interval_type: row.interval_type,
            mileage: row.interval_mileage,
            months: row.interval_months,
        })?;

    Ok(MaintenanceTask {
        id: row.id,
        vehicle_id: row.vehicle_id,
        title: row.title,
        description: row.description,
        category: row.category,
        interval,
        last_completed_mileage: row.last_completed_mileage,
        last_completed_date: row.last_completed_date,
        next_due_mileage: row.next_due_mileage,
        next_due_date: row.next_due_date,
        is_overdue: row.is_overdue,
        priority: row.priority,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub fn task_to_persistence(task: &MaintenanceTask) -> MaintenanceTaskRow {
    MaintenanceTaskRow {
        id: task.id,
        vehicle_id: task.vehicle_id,
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category,
        interval_type: task.interval.interval_type(),
        interval_mileage: task.interval.miles(),
        interval_months: task.interval.months(),
        last_completed_mileage: task.last_completed_mileage,
        last_completed_date: task.last_completed_date,
        next_due_mileage: task.next_due_mileage,
        next_due_date: task.next_due_date,
        is_overdue: task.is_overdue,
        priority: task.priority,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}
