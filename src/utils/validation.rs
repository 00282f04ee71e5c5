//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de formularios antes de cualquier llamada remota.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

/// Año mínimo aceptado para un vehículo
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Longitud mínima de contraseña que exige el servicio de autenticación
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Longitud exacta de un VIN
pub const VIN_LENGTH: usize = 17;

lazy_static! {
    // Las letras I, O y Q no se usan en un VIN
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("valid VIN regex");
    static ref EMAIL_REGEX: Regex = Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex");
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.message = Some("Invalid id".into());
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some("This field is required".into());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email (misma regla que el formulario del cliente)
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Email is required".into());
        return Err(error);
    }
    if !EMAIL_REGEX.is_match(value.trim()) {
        let mut error = ValidationError::new("email");
        error.message = Some("Email is invalid".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar VIN: 17 caracteres alfanuméricos sin I, O ni Q
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    let normalized = value.trim().to_uppercase();
    if normalized.chars().count() != VIN_LENGTH {
        let mut error = ValidationError::new("vin_length");
        error.message = Some("VIN must be 17 characters".into());
        error.add_param("actual".into(), &normalized.chars().count());
        return Err(error);
    }
    if !VIN_REGEX.is_match(&normalized) {
        let mut error = ValidationError::new("vin");
        error.message = Some("VIN contains invalid characters".into());
        error.add_param("value".into(), &normalized);
        return Err(error);
    }
    Ok(())
}

/// Año máximo aceptado: el año en curso más uno (modelos del año próximo)
pub fn max_model_year() -> i32 {
    Utc::now().year() + 1
}

/// Validar año del vehículo
pub fn validate_model_year(year: i32) -> Result<(), ValidationError> {
    validate_range(year, MIN_MODEL_YEAR, max_model_year()).map_err(|mut error| {
        error.message = Some("Please enter a valid year".into());
        error
    })
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Please enter a valid mileage".into());
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Convertir un odómetro recibido como entero con signo a millas
pub fn mileage_from_input(value: i64) -> Result<u32, ValidationError> {
    validate_non_negative(value)?;
    u32::try_from(value).map_err(|_| {
        let mut error = ValidationError::new("mileage_overflow");
        error.message = Some("Please enter a valid mileage".into());
        error.add_param("value".into(), &value);
        error
    })
}

/// Campos opcionales de formulario: un string en blanco equivale a ausente
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
