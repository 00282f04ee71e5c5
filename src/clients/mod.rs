//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for the hosted data service, the hosted
//! auth service and the public VIN registry. The auth and VIN clients sit
//! behind traits so the application state can be built with other
//! implementations.

pub mod nhtsa_client;
pub mod supabase_auth;
pub mod supabase_rest;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Session, SignUpOutcome};

pub use nhtsa_client::{MakeInfo, NhtsaClient, VinDecodeResult};
pub use supabase_auth::SupabaseAuthClient;
pub use supabase_rest::{Query, SupabaseRestClient};

/// Errores de la capa HTTP hacia servicios externos
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode remote response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }

    /// Mensaje legible del servicio remoto, si lo hubo
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Extraer el mensaje de error de un cuerpo JSON de error.
///
/// Los servicios alojados usan distintas claves según el endpoint:
/// `msg`, `message`, `error_description` o `error`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Convertir una respuesta no exitosa en `ClientError::Api`
pub(crate) async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Operaciones del servicio de autenticación
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<SignUpOutcome>;

    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session>;

    async fn refresh_session(&self, refresh_token: &str) -> ClientResult<Session>;

    async fn sign_out(&self, access_token: &str) -> ClientResult<()>;

    async fn reset_password(&self, email: &str) -> ClientResult<()>;

    async fn resend_verification(&self, email: &str) -> ClientResult<()>;
}

/// Registro externo de VIN
#[async_trait]
pub trait VinDecoder: Send + Sync {
    /// `Ok(None)` cuando el registro no reconoce el VIN
    async fn decode_vin(&self, vin: &str) -> ClientResult<Option<VinDecodeResult>>;

    async fn get_all_makes(&self) -> ClientResult<Vec<MakeInfo>>;

    async fn get_models_for_make_year(&self, make: &str, year: i32) -> ClientResult<Vec<String>>;
}
