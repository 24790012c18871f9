pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{BookCategoryDto, BookCategoryMapper};
pub use repository::{
    BookCategoryFilter, BookCategoryRepository, BookCategoryRepositoryFactory,
};
pub use service::BookCategoryService;

use crate::di::{Key, Registry};
use crate::domain::book::BOOK_REPOSITORY_FACTORY;
use crate::domain::category::CATEGORY_REPOSITORY_FACTORY;
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const BOOK_CATEGORY_MAPPER: Key<BookCategoryMapper> = Key::new("bookCategoryMapper");
pub const BOOK_CATEGORY_REPOSITORY_FACTORY: Key<BookCategoryRepositoryFactory> =
    Key::new("bookCategoryRepositoryFactory");
pub const BOOK_CATEGORY_SERVICE: Key<BookCategoryService> = Key::new("bookCategoryService");

pub struct BookCategoryModule;

#[async_trait]
impl Module for BookCategoryModule {
    fn name(&self) -> &'static str {
        "bookCategory"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            BOOK_CATEGORY_MAPPER.singleton(|_| Ok(BookCategoryMapper)),
            BOOK_CATEGORY_REPOSITORY_FACTORY.singleton(|r| {
                Ok(BookCategoryRepositoryFactory::new(r.resolve(&BOOK_CATEGORY_MAPPER)?))
            }),
            BOOK_CATEGORY_SERVICE.singleton(|r| {
                Ok(BookCategoryService::new(
                    r.resolve(&BOOK_CATEGORY_REPOSITORY_FACTORY)?,
                    r.resolve(&BOOK_REPOSITORY_FACTORY)?,
                    r.resolve(&CATEGORY_REPOSITORY_FACTORY)?,
                ))
            }),
        ]);
        Ok(())
    }
}
