use crate::config::AuthConfig;
use crate::error::{Result, ShelfwiseError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

pub trait HashService: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String>;

    fn verify(&self, plain: &str, hash: &str) -> Result<bool>;
}

/// Argon2id password hashing with configurable cost.
pub struct Argon2HashService {
    argon2: Argon2<'static>,
}

impl Argon2HashService {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let params = Params::new(config.hash_memory_kib, config.hash_iterations, 1, None)
            .map_err(|e| ShelfwiseError::Config(format!("invalid hashing parameters: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl HashService for Argon2HashService {
    fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ShelfwiseError::Internal(format!("password hashing failed: {e}")))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| ShelfwiseError::Internal(format!("stored hash is malformed: {e}")))?;
        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> AuthConfig {
        AuthConfig {
            jwt_secret: "secret".into(),
            jwt_expires_in: 60,
            hash_memory_kib: 8,
            hash_iterations: 1,
        }
    }

    #[test]
    fn test_hash_then_verify() {
        let service = Argon2HashService::new(&cheap()).unwrap();
        let hash = service.hash("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(service.verify("correct horse", &hash).unwrap());
        assert!(!service.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_invalid_params_are_a_config_error() {
        let mut config = cheap();
        config.hash_iterations = 0;
        assert!(matches!(
            Argon2HashService::new(&config),
            Err(ShelfwiseError::Config(_))
        ));
    }
}
