use axum::{routing::get, Json, Router};

use crate::data::DEFAULT_MAINTENANCE_SCHEDULE;
use crate::dto::ApiResponse;
use crate::models::MaintenanceScheduleItem;
use crate::state::AppState;

pub fn create_schedule_router() -> Router<AppState> {
    Router::new().route("/template", get(get_template))
}

async fn get_template() -> Json<ApiResponse<&'static [MaintenanceScheduleItem]>> {
    Json(ApiResponse::success(DEFAULT_MAINTENANCE_SCHEDULE))
}
