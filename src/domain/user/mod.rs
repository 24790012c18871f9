pub mod dto;
pub mod entity;
pub mod hash_service;
pub mod repository;
pub mod service;
pub mod token_service;

pub use dto::{UserDto, UserMapper};
pub use entity::UserRole;
pub use hash_service::{Argon2HashService, HashService};
pub use repository::{UserRepository, UserRepositoryFactory};
pub use service::UserService;
pub use token_service::{AuthPayload, JwtTokenService, TokenService};

use crate::config::APP_CONFIG;
use crate::di::{Key, Registry};
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;
use std::sync::Arc;

pub const USER_MAPPER: Key<UserMapper> = Key::new("userMapper");
pub const USER_REPOSITORY_FACTORY: Key<UserRepositoryFactory> = Key::new("userRepositoryFactory");
pub const HASH_SERVICE: Key<dyn HashService> = Key::new("hashService");
pub const TOKEN_SERVICE: Key<dyn TokenService> = Key::new("tokenService");
pub const USER_SERVICE: Key<UserService> = Key::new("userService");

pub struct UserModule;

#[async_trait]
impl Module for UserModule {
    fn name(&self) -> &'static str {
        "user"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            USER_MAPPER.singleton(|_| Ok(UserMapper)),
            USER_REPOSITORY_FACTORY
                .singleton(|r| Ok(UserRepositoryFactory::new(r.resolve(&USER_MAPPER)?))),
            HASH_SERVICE.singleton(|r| {
                let config = r.resolve(&APP_CONFIG)?;
                Ok(Arc::new(Argon2HashService::new(&config.auth)?) as Arc<dyn HashService>)
            }),
            TOKEN_SERVICE.singleton(|r| {
                let config = r.resolve(&APP_CONFIG)?;
                Ok(Arc::new(JwtTokenService::new(&config.auth)) as Arc<dyn TokenService>)
            }),
            USER_SERVICE.singleton(|r| {
                Ok(UserService::new(
                    r.resolve(&USER_REPOSITORY_FACTORY)?,
                    r.resolve(&HASH_SERVICE)?,
                    r.resolve(&TOKEN_SERVICE)?,
                ))
            }),
        ]);
        Ok(())
    }
}
