//! Services module
//!
//! Lógica pura del dominio (calendario y clasificación de mantenimiento) y
//! verificación de tokens. Nada aquí hace I/O.

pub mod due_classifier;
pub mod jwt_service;
pub mod schedule_service;

pub use due_classifier::{classify_tasks, is_overdue, sort_tasks, ClassifiedTasks};
pub use jwt_service::JwtService;
pub use schedule_service::{complete_task, instantiate_schedule, months_to_duration};
