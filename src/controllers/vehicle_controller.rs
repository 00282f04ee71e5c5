use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::data::DEFAULT_MAINTENANCE_SCHEDULE;
use crate::dto::vehicle_dto::{
    CompleteTaskRequest, CreateVehicleRequest, CreateVehicleResponse, UpdateMileageRequest,
    VehicleTasksResponse,
};
use crate::models::{AuthenticatedUser, MaintenanceTask, Vehicle};
use crate::repositories::{TaskStore, VehicleStore};
use crate::services::{classify_tasks, complete_task, instantiate_schedule};
use crate::state::AppState;
use crate::utils::errors::{field_error, forbidden_error, not_found_error, AppResult};
use crate::utils::validation::mileage_from_input;

/// Aviso cuando el vehículo se creó pero la plantilla no se pudo guardar
pub const SCHEDULE_WARNING: &str =
    "Vehicle added, but the maintenance schedule could not be created. You can add tasks later.";

pub struct VehicleController {
    vehicles: Arc<dyn VehicleStore>,
    tasks: Arc<dyn TaskStore>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            tasks: state.tasks.clone(),
        }
    }

    /// Vehículo del usuario; `NOT_FOUND` si no existe, `FORBIDDEN` si es de otro
    async fn owned_vehicle(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self
            .vehicles
            .find_by_id(id, &user.access_token)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if !vehicle.is_owned_by(user.user_id) {
            return Err(forbidden_error("access vehicle", "it belongs to another user"));
        }
        Ok(vehicle)
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
        now: DateTime<Utc>,
    ) -> AppResult<CreateVehicleResponse> {
        let new_vehicle = request.into_new_vehicle()?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id: user.user_id,
            make: new_vehicle.make,
            model: new_vehicle.model,
            year: new_vehicle.year,
            vin: new_vehicle.vin,
            trim: new_vehicle.trim,
            mileage: new_vehicle.mileage,
            nickname: new_vehicle.nickname,
            photo_url: None,
            created_at: now,
            updated_at: now,
        };
        let vehicle = self.vehicles.create(&vehicle, &user.access_token).await?;
        info!("🚗 Vehículo creado: {} ({})", vehicle.display_name(), vehicle.id);

        let tasks = instantiate_schedule(DEFAULT_MAINTENANCE_SCHEDULE, vehicle.id, vehicle.mileage, now);
        let response = match self.tasks.insert_batch(&tasks, &user.access_token).await {
            Ok(created) => {
                info!("📋 {} tareas de mantenimiento creadas para {}", created, vehicle.id);
                CreateVehicleResponse {
                    vehicle,
                    tasks_created: created,
                    schedule_created: true,
                    warning: None,
                }
            }
            Err(e) => {
                // El vehículo se conserva: no hay rollback
                warn!("⚠️ No se pudo crear la plantilla para {}: {}", vehicle.id, e);
                CreateVehicleResponse {
                    vehicle,
                    tasks_created: 0,
                    schedule_created: false,
                    warning: Some(SCHEDULE_WARNING.to_string()),
                }
            }
        };

        Ok(response)
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list_by_user(user.user_id, &user.access_token).await
    }

    pub async fn get_by_id(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<Vehicle> {
        self.owned_vehicle(user, id).await
    }

    pub async fn update_mileage(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: UpdateMileageRequest,
        now: DateTime<Utc>,
    ) -> AppResult<Vehicle> {
        let mileage = mileage_from_input(request.mileage).map_err(|e| field_error("mileage", e))?;
        self.owned_vehicle(user, id).await?;

        let vehicle = self
            .vehicles
            .update_mileage(id, mileage, now, &user.access_token)
            .await?;
        info!("📏 Odómetro de {} actualizado a {}", id, mileage);
        Ok(vehicle)
    }

    /// Borra primero las tareas y después el vehículo
    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        self.owned_vehicle(user, id).await?;

        self.tasks.delete_for_vehicle(id, &user.access_token).await?;
        self.vehicles.delete(id, &user.access_token).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }

    pub async fn tasks(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<VehicleTasksResponse> {
        let vehicle = self.owned_vehicle(user, id).await?;
        let tasks = self.tasks.list_for_vehicle(id, &user.access_token).await?;

        let mileage = HashMap::from([(vehicle.id, vehicle.mileage)]);
        let classified = classify_tasks(tasks, &mileage, now);

        Ok(VehicleTasksResponse {
            vehicle_id: vehicle.id,
            current_mileage: vehicle.mileage,
            overdue: classified.overdue,
            upcoming: classified.upcoming,
        })
    }

    /// Registrar un servicio realizado y recalcular el próximo vencimiento
    pub async fn complete_task(
        &self,
        user: &AuthenticatedUser,
        vehicle_id: Uuid,
        task_id: Uuid,
        request: CompleteTaskRequest,
        now: DateTime<Utc>,
    ) -> AppResult<MaintenanceTask> {
        let mileage = request
            .mileage
            .map(mileage_from_input)
            .transpose()
            .map_err(|e| field_error("mileage", e))?;

        let vehicle = self.owned_vehicle(user, vehicle_id).await?;
        let task = self
            .tasks
            .find_by_id(task_id, &user.access_token)
            .await?
            .filter(|task| task.vehicle_id == vehicle.id)
            .ok_or_else(|| not_found_error("Maintenance task", &task_id.to_string()))?;

        let completed = complete_task(&task, mileage.unwrap_or(vehicle.mileage), now);
        let saved = self.tasks.update(&completed, &user.access_token).await?;
        info!("✅ Tarea '{}' completada en {}", saved.title, vehicle.id);
        Ok(saved)
    }
}
