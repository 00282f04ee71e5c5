//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

pub const DEFAULT_NHTSA_API_URL: &str = "https://vpic.nhtsa.dot.gov/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DASHBOARD_TASK_LIMIT: usize = 10;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub nhtsa_api_url: String,
    pub cors_origins: Vec<String>,
    pub http_timeout: Duration,
    pub dashboard_task_limit: usize,
    pub log_level: Option<String>,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración con una fuente de variables cualquiera
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| optional(key).ok_or_else(|| anyhow!("{} must be set", key));

        let port = match optional("PORT") {
            Some(port) => port.parse().context("PORT must be a valid number")?,
            None => 3000,
        };
        let http_timeout_secs = match optional("HTTP_TIMEOUT_SECS") {
            Some(secs) => secs.parse().context("HTTP_TIMEOUT_SECS must be a valid number")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        let dashboard_task_limit = match optional("DASHBOARD_TASK_LIMIT") {
            Some(limit) => limit.parse().context("DASHBOARD_TASK_LIMIT must be a valid number")?,
            None => DEFAULT_DASHBOARD_TASK_LIMIT,
        };
        if dashboard_task_limit == 0 {
            return Err(anyhow!("DASHBOARD_TASK_LIMIT must be greater than zero"));
        }

        Ok(Self {
            environment: optional("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            supabase_jwt_secret: required("SUPABASE_JWT_SECRET")?,
            nhtsa_api_url: optional("NHTSA_API_URL").unwrap_or_else(|| DEFAULT_NHTSA_API_URL.to_string()),
            cors_origins: optional("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            http_timeout: Duration::from_secs(http_timeout_secs),
            dashboard_task_limit,
            log_level: optional("LOG_LEVEL"),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de log: `LOG_LEVEL` si es válido, si no debug en desarrollo e info en el resto
    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(if self.is_development() { Level::DEBUG } else { Level::INFO })
    }
}
