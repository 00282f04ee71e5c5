pub mod auth_controller;
pub mod dashboard_controller;
pub mod vehicle_controller;
pub mod vin_controller;

pub use auth_controller::AuthController;
pub use dashboard_controller::DashboardController;
pub use vehicle_controller::VehicleController;
pub use vin_controller::VinController;
