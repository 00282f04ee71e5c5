use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::models::{MaintenanceTask, Vehicle};
use crate::utils::validation::{
    blank_to_none, mileage_from_input, validate_model_year, validate_not_empty, validate_vin,
};

// Request para crear un vehículo
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Datos de un vehículo nuevo ya validados y normalizados
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub vin: Option<String>,
    pub trim: Option<String>,
    pub nickname: Option<String>,
}

impl CreateVehicleRequest {
    /// Validar el formulario completo, acumulando un error por campo
    pub fn into_new_vehicle(self) -> Result<NewVehicle, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_empty(&self.make) {
            errors.add("make", e);
        }
        if let Err(e) = validate_not_empty(&self.model) {
            errors.add("model", e);
        }
        if let Err(e) = validate_model_year(self.year) {
            errors.add("year", e);
        }
        let mileage = mileage_from_input(self.mileage).map_err(|e| errors.add("mileage", e)).ok();

        let vin = blank_to_none(self.vin).map(|v| v.to_uppercase());
        if let Some(vin) = &vin {
            if let Err(e) = validate_vin(vin) {
                errors.add("vin", e);
            }
        }

        match mileage {
            Some(mileage) if errors.errors().is_empty() => Ok(NewVehicle {
                make: self.make.trim().to_string(),
                model: self.model.trim().to_string(),
                year: self.year,
                mileage,
                vin,
                trim: blank_to_none(self.trim),
                nickname: blank_to_none(self.nickname),
            }),
            _ => Err(errors),
        }
    }
}

// Request para actualizar el odómetro
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMileageRequest {
    pub mileage: i64,
}

// Request para registrar un servicio realizado
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    /// Odómetro al hacer el servicio; por defecto el actual del vehículo
    #[serde(default)]
    pub mileage: Option<i64>,
}

// Response de creación: el vehículo existe aunque falle la plantilla
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleResponse {
    pub vehicle: Vehicle,
    pub tasks_created: usize,
    pub schedule_created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// Tareas de un vehículo ya clasificadas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTasksResponse {
    pub vehicle_id: uuid::Uuid,
    pub current_mileage: u32,
    pub overdue: Vec<MaintenanceTask>,
    pub upcoming: Vec<MaintenanceTask>,
}
