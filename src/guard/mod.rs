//! Route guards.
//!
//! A [`Guard`] inspects a request before it reaches the handler and either
//! lets it through or rejects it. Guards are attached to routers with
//! [`GuardLayer`].

use crate::domain::user::{AuthPayload, TokenService};
use crate::error::ShelfwiseError;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, header},
};
use std::sync::Arc;
use uuid::Uuid;

mod layer;

pub use layer::{GuardLayer, GuardMiddleware};

/// Standard Result type for Guard
/// Ok(()) means allowed
/// Err(GuardError) means denied
pub type GuardResult = Result<(), GuardError>;

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl From<GuardError> for ShelfwiseError {
    fn from(error: GuardError) -> Self {
        match error {
            GuardError::Forbidden(message) => ShelfwiseError::Forbidden(message),
            GuardError::Unauthorized(message) => ShelfwiseError::Unauthorized(message),
        }
    }
}

/// The Guard trait
///
/// Guards may attach what they learned about the caller to the request
/// extensions for handlers to extract.
#[async_trait]
pub trait Guard: Send + Sync + 'static {
    async fn can_activate(&self, request: &mut Request<Body>) -> GuardResult;
}

/// Requires `Authorization: Bearer <token>` with a token the token service
/// accepts, and stores the decoded [`AuthPayload`] in the request extensions.
pub struct BearerAuthGuard {
    token_service: Arc<dyn TokenService>,
}

impl BearerAuthGuard {
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }
}

#[async_trait]
impl Guard for BearerAuthGuard {
    async fn can_activate(&self, request: &mut Request<Body>) -> GuardResult {
        let header = request
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(|| GuardError::Unauthorized("Missing authorization header".into()))?;
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| GuardError::Unauthorized("Expected a Bearer token".into()))?;

        let payload = self
            .token_service
            .verify(token)
            .map_err(|_| GuardError::Unauthorized("Invalid access token".into()))?;

        request.extensions_mut().insert(payload);
        Ok(())
    }
}

/// Rejects callers acting on another user's resources.
pub fn ensure_same_user(payload: &AuthPayload, user_id: Uuid) -> Result<(), ShelfwiseError> {
    if payload.user_id == user_id {
        Ok(())
    } else {
        Err(ShelfwiseError::Forbidden(
            "Access to another user's resources is not allowed".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::domain::user::{JwtTokenService, UserRole};

    fn guard() -> (BearerAuthGuard, Arc<dyn TokenService>) {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&AuthConfig {
            jwt_secret: "guard-secret".into(),
            jwt_expires_in: 60,
            hash_memory_kib: 8,
            hash_iterations: 1,
        }));
        (BearerAuthGuard::new(tokens.clone()), tokens)
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/books");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_token_and_exposes_payload() {
        let (guard, tokens) = guard();
        let payload = AuthPayload {
            user_id: Uuid::new_v4(),
            role: UserRole::User,
        };
        let token = tokens.issue(payload).unwrap();

        let mut req = request(Some(&format!("Bearer {token}")));
        guard.can_activate(&mut req).await.unwrap();

        assert_eq!(req.extensions().get::<AuthPayload>(), Some(&payload));
    }

    #[tokio::test]
    async fn rejects_missing_malformed_and_forged_tokens() {
        let (guard, _) = guard();
        for header in [None, Some("Basic abc"), Some("Bearer "), Some("Bearer not-a-jwt")] {
            let mut req = request(header);
            let result = guard.can_activate(&mut req).await;
            assert!(
                matches!(result, Err(GuardError::Unauthorized(_))),
                "{header:?} should be rejected"
            );
        }
    }

    #[test]
    fn same_user_check() {
        let payload = AuthPayload {
            user_id: Uuid::new_v4(),
            role: UserRole::User,
        };
        assert!(ensure_same_user(&payload, payload.user_id).is_ok());
        assert!(matches!(
            ensure_same_user(&payload, Uuid::new_v4()),
            Err(ShelfwiseError::Forbidden(_))
        ));
    }
}
