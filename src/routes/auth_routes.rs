use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;

use crate::controllers::AuthController;
use crate::dto::auth_dto::{
    EmailRequest, RefreshRequest, SessionResponse, SignInRequest, SignUpRequest, SignUpResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth_middleware;
use crate::models::{AuthenticatedUser, User};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::AppJson;

/// Configura las rutas de autenticación
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/sign-out", post(sign_out))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/refresh", post(refresh))
        .route("/reset-password", post(reset_password))
        .route("/resend-verification", post(resend_verification))
        .merge(protected)
}

async fn sign_up(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignUpRequest>,
) -> Result<Json<ApiResponse<SignUpResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.sign_up(request, Utc::now()).await?;
    let message = if response.email_confirmation_required {
        "Please check your email to verify your account"
    } else {
        "Account created"
    };
    Ok(Json(ApiResponse::success_with_message(response, message)))
}

async fn sign_in(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignInRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.sign_in(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn refresh(
    State(state): State<AppState>,
    AppJson(request): AppJson<RefreshRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.refresh(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn reset_password(
    State(state): State<AppState>,
    AppJson(request): AppJson<EmailRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    controller.reset_password(request).await?;
    Ok(Json(ApiResponse::ok("Password reset email sent")))
}

async fn resend_verification(
    State(state): State<AppState>,
    AppJson(request): AppJson<EmailRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    controller.resend_verification(request).await?;
    Ok(Json(ApiResponse::ok("Verification email sent")))
}

async fn sign_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    controller.sign_out(&user).await?;
    Ok(Json(ApiResponse::ok("Signed out")))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let controller = AuthController::new(&state);
    let profile = controller.me(&user, Utc::now()).await?;
    Ok(Json(ApiResponse::success(profile)))
}
