use shelfwise::Result;
use shelfwise::di::Registry;
use shelfwise::domain::user::{AuthPayload, TOKEN_SERVICE, TokenService, UserRole};
use std::sync::Arc;
use uuid::Uuid;

/// Issues access tokens with the registry's own token service, so the
/// server under test accepts them.
pub struct AuthHelper {
    tokens: Arc<dyn TokenService>,
}

impl AuthHelper {
    pub fn new(registry: &Registry) -> Result<Self> {
        Ok(Self {
            tokens: registry.resolve(&TOKEN_SERVICE)?,
        })
    }

    pub fn mock_auth(&self, user_id: Uuid, role: UserRole) -> Result<String> {
        self.tokens.issue(AuthPayload { user_id, role })
    }

    /// `Authorization` header value for `user_id`.
    pub fn bearer(&self, user_id: Uuid, role: UserRole) -> Result<String> {
        Ok(format!("Bearer {}", self.mock_auth(user_id, role)?))
    }
}
