//! Modelo de perfil de usuario
//!
//! El id del perfil coincide con el id del usuario en el servicio de
//! autenticación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Perfil recién creado: nunca premium
    pub fn new_profile(id: Uuid, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: email.into(),
            is_premium: false,
            created_at: now,
        }
    }
}
