//! Datos estáticos que se distribuyen con el servicio

pub mod maintenance_schedule;

pub use maintenance_schedule::DEFAULT_MAINTENANCE_SCHEDULE;
