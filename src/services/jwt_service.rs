use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;
use uuid::Uuid;

use crate::models::auth::{AuthenticatedUser, Claims, AUTHENTICATED_AUDIENCE};
use crate::utils::errors::AppError;

/// Verificador de access tokens emitidos por el servicio de autenticación.
///
/// Los tokens se firman con HS256 usando el secreto JWT del proyecto, así que
/// se validan localmente sin llamada remota.
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("🔐 Token rechazado: {}", e);
                AppError::Unauthorized("Invalid or expired session".to_string())
            })
    }

    /// Obtiene el usuario autenticado desde el token
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid subject in token".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            access_token: token.to_string(),
        })
    }
}
