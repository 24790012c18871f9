pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{AuthorBookDto, AuthorBookMapper};
pub use repository::{AuthorBookFilter, AuthorBookRepository, AuthorBookRepositoryFactory};
pub use service::AuthorBookService;

use crate::di::{Key, Registry};
use crate::domain::author::AUTHOR_REPOSITORY_FACTORY;
use crate::domain::book::BOOK_REPOSITORY_FACTORY;
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const AUTHOR_BOOK_MAPPER: Key<AuthorBookMapper> = Key::new("authorBookMapper");
pub const AUTHOR_BOOK_REPOSITORY_FACTORY: Key<AuthorBookRepositoryFactory> =
    Key::new("authorBookRepositoryFactory");
pub const AUTHOR_BOOK_SERVICE: Key<AuthorBookService> = Key::new("authorBookService");

pub struct AuthorBookModule;

#[async_trait]
impl Module for AuthorBookModule {
    fn name(&self) -> &'static str {
        "authorBook"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            AUTHOR_BOOK_MAPPER.singleton(|_| Ok(AuthorBookMapper)),
            AUTHOR_BOOK_REPOSITORY_FACTORY.singleton(|r| {
                Ok(AuthorBookRepositoryFactory::new(r.resolve(&AUTHOR_BOOK_MAPPER)?))
            }),
            AUTHOR_BOOK_SERVICE.singleton(|r| {
                Ok(AuthorBookService::new(
                    r.resolve(&AUTHOR_BOOK_REPOSITORY_FACTORY)?,
                    r.resolve(&AUTHOR_REPOSITORY_FACTORY)?,
                    r.resolve(&BOOK_REPOSITORY_FACTORY)?,
                ))
            }),
        ]);
        Ok(())
    }
}
