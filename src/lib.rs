//! PocketMechanic - API de mantenimiento de vehículos
//!
//! Calendario de mantenimiento por vehículo, clasificación de tareas
//! vencidas/próximas y proxy hacia los servicios de autenticación, datos y
//! decodificación de VIN.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod data;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
