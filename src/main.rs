use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use pocket_mechanic::config::EnvironmentConfig;
use pocket_mechanic::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .init();

    info!("🔧 PocketMechanic - API de mantenimiento de vehículos");
    info!("====================================================");
    info!("🌍 Entorno: {}", config.environment);

    if config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío: se aceptan requests de cualquier origen");
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let state = AppState::from_config(config)?;
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/sign-up - Registro");
    info!("   POST /api/auth/sign-in - Login");
    info!("   POST /api/auth/refresh - Refrescar sesión");
    info!("   POST /api/auth/reset-password - Recuperar contraseña");
    info!("   POST /api/auth/resend-verification - Reenviar verificación");
    info!("   POST /api/auth/sign-out - Logout");
    info!("   GET  /api/auth/me - Perfil actual");
    info!("📋 Mantenimiento:");
    info!("   GET  /api/schedule/template - Plantilla por defecto");
    info!("   GET  /api/dashboard - Dashboard");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   POST /api/vehicles - Añadir vehículo");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   PUT  /api/vehicles/:id/mileage - Actualizar odómetro");
    info!("   GET  /api/vehicles/:id/tasks - Tareas clasificadas");
    info!("   POST /api/vehicles/:id/tasks/:task_id/complete - Registrar servicio");
    info!("🔎 VIN:");
    info!("   GET  /api/vin/decode/:vin - Decodificar VIN");
    info!("   GET  /api/vin/makes - Marcas");
    info!("   GET  /api/vin/makes/:make/models/:year - Modelos");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("No se pudo abrir {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
