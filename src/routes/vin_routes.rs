use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::clients::{MakeInfo, VinDecodeResult};
use crate::controllers::VinController;
use crate::dto::ApiResponse;
use crate::middleware::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

pub fn create_vin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/decode/:vin", get(decode_vin))
        .route("/makes", get(list_makes))
        .route("/makes/:make/models/:year", get(list_models))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn decode_vin(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<Json<ApiResponse<VinDecodeResult>>, AppError> {
    let controller = VinController::new(&state);
    let decoded = controller.decode(&vin).await?;
    Ok(Json(ApiResponse::success(decoded)))
}

async fn list_makes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MakeInfo>>>, AppError> {
    let controller = VinController::new(&state);
    let makes = controller.makes().await?;
    Ok(Json(ApiResponse::success(makes)))
}

async fn list_models(
    State(state): State<AppState>,
    Path((make, year)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| validation_error("year", "Year must be a number"))?;
    let controller = VinController::new(&state);
    let models = controller.models(&make, year).await?;
    Ok(Json(ApiResponse::success(models)))
}
