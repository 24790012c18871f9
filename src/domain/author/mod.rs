pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{AuthorDto, AuthorMapper};
pub use repository::{AuthorFilter, AuthorRepository, AuthorRepositoryFactory};
pub use service::AuthorService;

use crate::di::{Key, Registry};
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const AUTHOR_MAPPER: Key<AuthorMapper> = Key::new("authorMapper");
pub const AUTHOR_REPOSITORY_FACTORY: Key<AuthorRepositoryFactory> =
    Key::new("authorRepositoryFactory");
pub const AUTHOR_SERVICE: Key<AuthorService> = Key::new("authorService");

pub struct AuthorModule;

#[async_trait]
impl Module for AuthorModule {
    fn name(&self) -> &'static str {
        "author"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            AUTHOR_MAPPER.singleton(|_| Ok(AuthorMapper)),
            AUTHOR_REPOSITORY_FACTORY
                .singleton(|r| Ok(AuthorRepositoryFactory::new(r.resolve(&AUTHOR_MAPPER)?))),
            AUTHOR_SERVICE
                .singleton(|r| Ok(AuthorService::new(r.resolve(&AUTHOR_REPOSITORY_FACTORY)?))),
        ]);
        Ok(())
    }
}
