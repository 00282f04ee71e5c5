//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los clientes externos se construyen una vez
//! al arrancar y se comparten detrás de `Arc`.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::clients::{AuthProvider, NhtsaClient, SupabaseAuthClient, SupabaseRestClient, VinDecoder};
use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    MaintenanceTaskRepository, ProfileStore, TaskStore, UserRepository, VehicleRepository,
    VehicleStore,
};
use crate::services::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: Arc<JwtService>,
    pub auth: Arc<dyn AuthProvider>,
    pub vin: Arc<dyn VinDecoder>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    /// Construir los clientes reales a partir de la configuración
    pub fn from_config(config: EnvironmentConfig) -> Result<Self> {
        let timeout = config.http_timeout;

        let rest = SupabaseRestClient::new(&config.supabase_url, &config.supabase_anon_key, timeout)
            .context("Error creando el cliente del servicio de datos")?;
        let auth = SupabaseAuthClient::new(&config.supabase_url, &config.supabase_anon_key, timeout)
            .context("Error creando el cliente de autenticación")?;
        let vin = NhtsaClient::new(&config.nhtsa_api_url, timeout)
            .context("Error creando el cliente de VIN")?;

        Ok(Self {
            jwt: Arc::new(JwtService::new(&config.supabase_jwt_secret)),
            auth: Arc::new(auth),
            vin: Arc::new(vin),
            vehicles: Arc::new(VehicleRepository::new(rest.clone())),
            tasks: Arc::new(MaintenanceTaskRepository::new(rest.clone())),
            profiles: Arc::new(UserRepository::new(rest)),
            config: Arc::new(config),
        })
    }

    /// Construir el estado con colaboradores ya creados
    pub fn from_parts(
        config: EnvironmentConfig,
        auth: Arc<dyn AuthProvider>,
        vin: Arc<dyn VinDecoder>,
        vehicles: Arc<dyn VehicleStore>,
        tasks: Arc<dyn TaskStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            jwt: Arc::new(JwtService::new(&config.supabase_jwt_secret)),
            config: Arc::new(config),
            auth,
            vin,
            vehicles,
            tasks,
            profiles,
        }
    }
}
