//! Repositories - acceso a las tablas del servicio de datos
//!
//! Cada store es un trait para que el estado de la aplicación pueda
//! construirse con otra implementación (tests, otro backend). Todas las
//! operaciones reciben el access token del usuario.

pub mod maintenance_task_repository;
pub mod mapping;
pub mod user_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{MaintenanceTask, User, Vehicle};
use crate::utils::errors::AppResult;

pub use maintenance_task_repository::MaintenanceTaskRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;

pub const USERS_TABLE: &str = "users";
pub const VEHICLES_TABLE: &str = "vehicles";
pub const MAINTENANCE_TASKS_TABLE: &str = "maintenance_tasks";

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn create(&self, vehicle: &Vehicle, access_token: &str) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<Vehicle>>;

    /// Vehículos del usuario, el más reciente primero
    async fn list_by_user(&self, user_id: Uuid, access_token: &str) -> AppResult<Vec<Vehicle>>;

    async fn update_mileage(
        &self,
        id: Uuid,
        mileage: u32,
        updated_at: DateTime<Utc>,
        access_token: &str,
    ) -> AppResult<Vehicle>;

    async fn delete(&self, id: Uuid, access_token: &str) -> AppResult<()>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserta todas las tareas en una sola llamada; devuelve cuántas se crearon
    async fn insert_batch(&self, tasks: &[MaintenanceTask], access_token: &str) -> AppResult<usize>;

    async fn list_for_vehicle(&self, vehicle_id: Uuid, access_token: &str) -> AppResult<Vec<MaintenanceTask>>;

    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<MaintenanceTask>>;

    async fn update(&self, task: &MaintenanceTask, access_token: &str) -> AppResult<MaintenanceTask>;

    async fn delete_for_vehicle(&self, vehicle_id: Uuid, access_token: &str) -> AppResult<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid, access_token: &str) -> AppResult<Option<User>>;

    async fn create(&self, user: &User, access_token: &str) -> AppResult<User>;
}
