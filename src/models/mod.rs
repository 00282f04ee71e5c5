//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio (camelCase hacia el cliente).
//! Las filas snake_case del backend viven en `repositories::mapping`.

pub mod auth;
pub mod maintenance;
pub mod user;
pub mod vehicle;

pub use auth::{AuthUser, AuthenticatedUser, Claims, Session, SignUpOutcome};
pub use maintenance::{
    Interval, IntervalType, MaintenanceCategory, MaintenanceScheduleItem, MaintenanceTask,
    Priority,
};
pub use user::User;
pub use vehicle::Vehicle;
