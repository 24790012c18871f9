use crate::config::AuthConfig;
use crate::domain::user::entity::UserRole;
use crate::error::{Result, ShelfwiseError};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity carried by an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: Uuid,
    role: UserRole,
    exp: i64,
}

pub trait TokenService: Send + Sync {
    fn issue(&self, payload: AuthPayload) -> Result<String>;

    fn verify(&self, token: &str) -> Result<AuthPayload>;
}

/// HS256 JWTs signed with the configured secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtTokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expires_in: i64::try_from(config.jwt_expires_in).unwrap_or(i64::MAX),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, payload: AuthPayload) -> Result<String> {
        let claims = Claims {
            user_id: payload.user_id,
            role: payload.role,
            exp: Utc::now().timestamp().saturating_add(self.expires_in),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ShelfwiseError::Internal(format!("token signing failed: {e}")))
    }

    fn verify(&self, token: &str) -> Result<AuthPayload> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map_err(|e| ShelfwiseError::Unauthorized(format!("invalid access token: {e}")))?;
        Ok(AuthPayload {
            user_id: data.claims.user_id,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.into(),
            jwt_expires_in: 3600,
            hash_memory_kib: 8,
            hash_iterations: 1,
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let service = JwtTokenService::new(&config("secret"));
        let payload = AuthPayload {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };

        let token = service.issue(payload).unwrap();
        assert_eq!(service.verify(&token).unwrap(), payload);
    }

    #[test]
    fn test_foreign_signature_is_unauthorized() {
        let issuer = JwtTokenService::new(&config("one"));
        let verifier = JwtTokenService::new(&config("two"));
        let token = issuer
            .issue(AuthPayload {
                user_id: Uuid::new_v4(),
                role: UserRole::User,
            })
            .unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(ShelfwiseError::Unauthorized(_))
        ));
        assert!(verifier.verify("garbage").is_err());
    }
}
