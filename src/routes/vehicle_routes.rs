use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    CompleteTaskRequest, CreateVehicleRequest, CreateVehicleResponse, UpdateMileageRequest,
    VehicleTasksResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth_middleware;
use crate::models::{AuthenticatedUser, MaintenanceTask, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::{parse_id, AppJson};

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route("/:id", get(get_vehicle).delete(delete_vehicle))
        .route("/:id/mileage", put(update_mileage))
        .route("/:id/tasks", get(list_tasks))
        .route("/:id/tasks/:task_id/complete", post(complete_task))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    AppJson(request): AppJson<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<CreateVehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(&user, request, Utc::now()).await?;
    let message = response
        .warning
        .clone()
        .unwrap_or_else(|| "Vehicle added successfully".to_string());
    Ok(Json(ApiResponse::success_with_message(response, message)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicles = controller.list(&user).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let id = parse_id("id", &id)?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.get_by_id(&user, id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn update_mileage(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateMileageRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let id = parse_id("id", &id)?;
    let controller = VehicleController::new(&state);
    let vehicle = controller.update_mileage(&user, id, request, Utc::now()).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = parse_id("id", &id)?;
    let controller = VehicleController::new(&state);
    controller.delete(&user, id).await?;
    Ok(Json(ApiResponse::ok("Vehicle deleted")))
}

async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleTasksResponse>>, AppError> {
    let id = parse_id("id", &id)?;
    let controller = VehicleController::new(&state);
    let tasks = controller.tasks(&user, id, Utc::now()).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

async fn complete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, task_id)): Path<(String, String)>,
    AppJson(request): AppJson<CompleteTaskRequest>,
) -> Result<Json<ApiResponse<MaintenanceTask>>, AppError> {
    let id = parse_id("id", &id)?;
    let task_id = parse_id("taskId", &task_id)?;
    let controller = VehicleController::new(&state);
    let task = controller
        .complete_task(&user, id, task_id, request, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success_with_message(task, "Service logged")))
}
