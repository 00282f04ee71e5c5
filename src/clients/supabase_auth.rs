//! Cliente del servicio de autenticación
//!
//! Endpoints GoTrue bajo `/auth/v1`: registro, login por contraseña,
//! refresco de sesión, logout, recuperación de contraseña y reenvío del
//! email de verificación.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::{error_from_response, AuthProvider, ClientError, ClientResult};
use crate::models::{AuthUser, Session, SignUpOutcome};

/// Cuerpo de `/signup`: con confirmación por email llega solo el usuario
/// (en la raíz); con auto-confirmación llega una sesión completa.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
}

impl SignUpResponse {
    fn into_outcome(self) -> SignUpOutcome {
        let user = self.user.or_else(|| {
            self.id.map(|id| AuthUser {
                id,
                email: self.email.clone(),
                email_confirmed_at: None,
                created_at: None,
            })
        });

        let session = match (self.access_token, self.refresh_token, &user) {
            (Some(access_token), Some(refresh_token), Some(user)) => Some(Session {
                access_token,
                refresh_token,
                token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
                expires_in: self.expires_in.unwrap_or_default(),
                expires_at: self.expires_at,
                user: user.clone(),
            }),
            _ => None,
        };

        SignUpOutcome { user, session }
    }
}

/// Cliente del servicio de autenticación
#[derive(Clone)]
pub struct SupabaseAuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuthClient {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: format!("{}/auth/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("auth response: {}", e)))
    }

    async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<SignUpOutcome> {
        info!("📝 Registrando usuario: {}", email);
        let request = self.post("/signup").json(&json!({ "email": email, "password": password }));
        let response: SignUpResponse = self.send_json(request).await?;
        Ok(response.into_outcome())
    }

    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        info!("🔑 Login de usuario: {}", email);
        let request = self
            .post("/token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        self.send_json(request).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> ClientResult<Session> {
        let request = self
            .post("/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        self.send_json(request).await
    }

    async fn sign_out(&self, access_token: &str) -> ClientResult<()> {
        let request = self
            .post("/logout")
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token));
        match self.send_empty(request).await {
            // Sesión ya invalidada: para el cliente el logout se cumplió igual
            Err(ClientError::Api { status: 401, .. }) | Err(ClientError::Api { status: 404, .. }) => {
                warn!("⚠️ Logout de una sesión que ya no existe");
                Ok(())
            }
            other => other,
        }
    }

    async fn reset_password(&self, email: &str) -> ClientResult<()> {
        info!("📧 Enviando email de recuperación a {}", email);
        let request = self.post("/recover").json(&json!({ "email": email }));
        self.send_empty(request).await
    }

    async fn resend_verification(&self, email: &str) -> ClientResult<()> {
        info!("📧 Reenviando email de verificación a {}", email);
        let request = self
            .post("/resend")
            .json(&json!({ "type": "signup", "email": email }));
        self.send_empty(request).await
    }
}
