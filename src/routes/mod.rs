pub mod auth_routes;
pub mod dashboard_routes;
pub mod schedule_routes;
pub mod vehicle_routes;
pub mod vin_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::auth_routes(state.clone()))
        .nest("/api/schedule", schedule_routes::create_schedule_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router(state.clone()))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/api/vin", vin_routes::create_vin_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors_middleware(&state.config.cors_origins)),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
