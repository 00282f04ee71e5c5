//! Extractores de request con errores en el formato de la API
//!
//! Los rechazos de axum (body mal formado, campos ausentes, ids inválidos)
//! se devuelven como `400 VALIDATION_ERROR` con el campo en `details`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use uuid::Uuid;

use super::errors::{field_error, AppError};
use super::validation::validate_uuid;

/// `Json<T>` cuyo rechazo es un `AppError`
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// Parsear un segmento de la ruta como UUID
pub fn parse_id(field: &'static str, value: &str) -> Result<Uuid, AppError> {
    validate_uuid(value).map_err(|error| field_error(field, error))
}
