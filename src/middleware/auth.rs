//! Middleware de autenticación JWT
//!
//! Extrae el bearer token, lo verifica localmente y deja el
//! `AuthenticatedUser` en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::{state::AppState, utils::errors::AppError};

/// Token del header `Authorization: Bearer <token>`. El esquema no distingue mayúsculas.
pub fn bearer_token(request: &Request) -> Option<&str> {
    let value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let user = state.jwt.authenticate(token)?;
    debug!("🔐 Request autenticada para {}", user.user_id);

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
