use axum::{extract::State, middleware, routing::get, Extension, Json, Router};
use chrono::Utc;

use crate::controllers::DashboardController;
use crate::dto::dashboard_dto::DashboardResponse;
use crate::dto::ApiResponse;
use crate::middleware::auth_middleware;
use crate::models::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let controller = DashboardController::new(&state);
    let dashboard = controller.get(&user, Utc::now()).await?;
    Ok(Json(ApiResponse::success(dashboard)))
}
