//! Modelo de Vehicle
//!
//! Vehículo de un usuario. Es dueño exclusivo de sus tareas de mantenimiento.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vehicle principal (forma de dominio, camelCase en la API)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub trim: Option<String>,
    /// Odómetro actual en millas
    pub mileage: u32,
    pub nickname: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nombre para mostrar, p. ej. "2018 Honda Civic"
    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nickname) => format!("{} ({} {} {})", nickname, self.year, self.make, self.model),
            None => format!("{} {} {}", self.year, self.make, self.model),
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
