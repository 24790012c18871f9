pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{BookDto, BookMapper};
pub use entity::{BookFormat, BookLanguage};
pub use repository::{BookFilter, BookRepository, BookRepositoryFactory};
pub use service::BookService;

use crate::di::{Key, Registry};
use crate::domain::author::AUTHOR_REPOSITORY_FACTORY;
use crate::domain::author_book::AUTHOR_BOOK_REPOSITORY_FACTORY;
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const BOOK_MAPPER: Key<BookMapper> = Key::new("bookMapper");
pub const BOOK_REPOSITORY_FACTORY: Key<BookRepositoryFactory> = Key::new("bookRepositoryFactory");
pub const BOOK_SERVICE: Key<BookService> = Key::new("bookService");

pub struct BookModule;

#[async_trait]
impl Module for BookModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            BOOK_MAPPER.singleton(|_| Ok(BookMapper)),
            BOOK_REPOSITORY_FACTORY
                .singleton(|r| Ok(BookRepositoryFactory::new(r.resolve(&BOOK_MAPPER)?))),
            BOOK_SERVICE.singleton(|r| {
                Ok(BookService::new(
                    r.resolve(&BOOK_REPOSITORY_FACTORY)?,
                    r.resolve(&AUTHOR_REPOSITORY_FACTORY)?,
                    r.resolve(&AUTHOR_BOOK_REPOSITORY_FACTORY)?,
                ))
            }),
        ]);
        Ok(())
    }
}
