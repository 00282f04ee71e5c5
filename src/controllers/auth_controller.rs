use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use validator::Validate;

use crate::clients::{AuthProvider, ClientError};
use crate::dto::auth_dto::{
    EmailRequest, RefreshRequest, SessionResponse, SignInRequest, SignUpRequest, SignUpResponse,
};
use crate::models::{AuthenticatedUser, User};
use crate::repositories::ProfileStore;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError, AppResult};

/// `true` cuando el servicio de autenticación rechaza el login porque el
/// email todavía no fue confirmado
pub fn is_email_not_confirmed(err: &ClientError) -> bool {
    match err {
        ClientError::Api { message, .. } => message.to_lowercase().contains("email not confirmed"),
        _ => false,
    }
}

/// Errores del servicio de autenticación con el código que espera el cliente
fn auth_error(err: ClientError) -> AppError {
    if is_email_not_confirmed(&err) {
        return AppError::EmailNotConfirmed(err.message());
    }
    match err {
        ClientError::Api { status: 400, message } | ClientError::Api { status: 422, message } => {
            AppError::BadRequest(message)
        }
        other => other.into(),
    }
}

/// Igual que `auth_error` pero credenciales inválidas son 401
fn credentials_error(err: ClientError) -> AppError {
    match auth_error(err) {
        AppError::BadRequest(message) => AppError::Unauthorized(message),
        other => other,
    }
}

pub struct AuthController {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    anon_key: String,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            auth: state.auth.clone(),
            profiles: state.profiles.clone(),
            anon_key: state.config.supabase_anon_key.clone(),
        }
    }

    pub async fn sign_up(&self, request: SignUpRequest, now: DateTime<Utc>) -> AppResult<SignUpResponse> {
        request.validate()?;
        if request.password != request.confirm_password {
            return Err(validation_error("confirmPassword", "Passwords do not match"));
        }

        let email = request.email.trim();
        let outcome = self
            .auth
            .sign_up(email, &request.password)
            .await
            .map_err(auth_error)?;

        let mut profile = None;
        if let Some(auth_user) = &outcome.user {
            // Sin sesión todavía (email pendiente) se inserta con la clave anónima
            let token = outcome
                .session
                .as_ref()
                .map(|s| s.access_token.as_str())
                .unwrap_or(self.anon_key.as_str());

            let email = auth_user.email.clone().unwrap_or_else(|| email.to_string());
            let created = self
                .profiles
                .create(&User::new_profile(auth_user.id, email, now), token)
                .await?;
            info!("✅ Perfil creado para {}", created.id);
            profile = Some(created);
        }

        Ok(SignUpResponse {
            user: profile,
            email_confirmation_required: outcome.session.is_none(),
            session: outcome.session,
        })
    }

    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<SessionResponse> {
        request.validate()?;

        let session = self
            .auth
            .sign_in(request.email.trim(), &request.password)
            .await
            .map_err(credentials_error)?;

        Ok(SessionResponse { session })
    }

    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<SessionResponse> {
        request.validate()?;

        let session = self
            .auth
            .refresh_session(&request.refresh_token)
            .await
            .map_err(credentials_error)?;

        Ok(SessionResponse { session })
    }

    pub async fn sign_out(&self, user: &AuthenticatedUser) -> AppResult<()> {
        self.auth.sign_out(&user.access_token).await.map_err(auth_error)?;
        info!("👋 Sesión cerrada para {}", user.user_id);
        Ok(())
    }

    pub async fn reset_password(&self, request: EmailRequest) -> AppResult<()> {
        request.validate()?;
        self.auth
            .reset_password(request.email.trim())
            .await
            .map_err(auth_error)
    }

    pub async fn resend_verification(&self, request: EmailRequest) -> AppResult<()> {
        request.validate()?;
        self.auth
            .resend_verification(request.email.trim())
            .await
            .map_err(auth_error)
    }

    /// Perfil del usuario actual. Si no existe se crea; si la creación falla
    /// se devuelve un perfil mínimo construido desde el token.
    pub async fn me(&self, user: &AuthenticatedUser, now: DateTime<Utc>) -> AppResult<User> {
        if let Some(profile) = self.profiles.find_by_id(user.user_id, &user.access_token).await? {
            return Ok(profile);
        }

        let fallback = User::new_profile(user.user_id, user.email.clone().unwrap_or_default(), now);
        match self.profiles.create(&fallback, &user.access_token).await {
            Ok(profile) => {
                info!("✅ Perfil creado para {}", profile.id);
                Ok(profile)
            }
            Err(e) => {
                warn!("⚠️ No se pudo crear el perfil de {}: {}", user.user_id, e);
                Ok(fallback)
            }
        }
    }
}
