//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::clients::ClientError;
use crate::repositories::mapping::MappingError;

/// Mensaje genérico cuando el servicio externo no devuelve un mensaje útil
pub const GENERIC_REMOTE_FAILURE: &str = "Something went wrong. Please try again.";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input in '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Email not confirmed: {0}")]
    EmailNotConfirmed(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código estable que el cliente móvil usa para decidir qué alerta mostrar
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidInput { .. } => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::EmailNotConfirmed(_) => "EMAIL_NOT_CONFIRMED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::ExternalApi(_) => "EXTERNAL_API_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidInput { .. } | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::EmailNotConfirmed(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = Some(self.code().to_string());

        let error_response = match self {
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            AppError::InvalidInput { field, message } => {
                warn!("Invalid input in '{}': {}", field, message);
                // Mismo formato de `details` que los errores de validator
                let mut details = serde_json::Map::new();
                details.insert(
                    field,
                    json!([{ "code": "invalid_input", "message": message, "params": {} }]),
                );
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(serde_json::Value::Object(details)),
                    code,
                }
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::EmailNotConfirmed(msg) => {
                warn!("Email not confirmed: {}", msg);
                ErrorResponse {
                    error: "Email Not Confirmed".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code,
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code,
                }
            }

            AppError::ExternalApi(msg) => {
                error!("External API error: {}", msg);
                // El mensaje del servicio externo se muestra tal cual si existe
                let message = if msg.trim().is_empty() {
                    GENERIC_REMOTE_FAILURE.to_string()
                } else {
                    msg
                };
                ErrorResponse {
                    error: "External API Error".to_string(),
                    message,
                    details: None,
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, message } if status == 401 => AppError::Unauthorized(message),
            ClientError::Api { status, message } if status == 403 => AppError::Forbidden(message),
            ClientError::Api { message, .. } => AppError::ExternalApi(message),
            ClientError::Http(e) => AppError::ExternalApi(e.to_string()),
            ClientError::Decode(msg) => AppError::ExternalApi(msg),
        }
    }
}

lazy_static! {
    static ref MISSING_FIELD: Regex = Regex::new(r"missing field `([^`]+)`").expect("valid regex");
    static ref INVALID_FIELD: Regex =
        Regex::new(r"(?:^|: )([A-Za-z_][A-Za-z0-9_.\[\]]*): (?:invalid|unknown)").expect("valid regex");
}

/// Campo señalado por un error de deserialización del body, si se puede identificar
fn rejected_field(text: &str) -> Option<(String, String)> {
    if let Some(caps) = MISSING_FIELD.captures(text) {
        let field = caps[1].to_string();
        let message = format!("{} is required", field);
        return Some((field, message));
    }
    INVALID_FIELD.captures(text).map(|caps| {
        let field = caps[1].to_string();
        let message = format!("{} has an invalid value", field);
        (field, message)
    })
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => {
                let (field, message) = rejected_field(&text)
                    .unwrap_or_else(|| ("body".to_string(), "Request body has invalid fields".to_string()));
                AppError::InvalidInput { field, message }
            }
            JsonRejection::JsonSyntaxError(_) => AppError::InvalidInput {
                field: "body".to_string(),
                message: "Request body is not valid JSON".to_string(),
            },
            JsonRejection::MissingJsonContentType(_) => AppError::InvalidInput {
                field: "body".to_string(),
                message: "Expected a JSON request body".to_string(),
            },
            _ => AppError::InvalidInput {
                field: "body".to_string(),
                message: text,
            },
        }
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Error de validación de un solo campo a partir de un `ValidationError` ya construido
pub fn field_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
