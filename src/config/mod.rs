//! Configuración del proyecto
//!
//! Variables de entorno y valores por defecto del servicio.

pub mod environment;

pub use environment::*;
