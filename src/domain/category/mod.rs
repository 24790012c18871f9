pub mod dto;
pub mod entity;
pub mod repository;
pub mod service;

pub use dto::{CategoryDto, CategoryMapper};
pub use repository::{CategoryFilter, CategoryRepository, CategoryRepositoryFactory};
pub use service::CategoryService;

use crate::di::{Key, Registry};
use crate::error::Result;
use crate::module::Module;
use async_trait::async_trait;

pub const CATEGORY_MAPPER: Key<CategoryMapper> = Key::new("categoryMapper");
pub const CATEGORY_REPOSITORY_FACTORY: Key<CategoryRepositoryFactory> =
    Key::new("categoryRepositoryFactory");
pub const CATEGORY_SERVICE: Key<CategoryService> = Key::new("categoryService");

pub struct CategoryModule;

#[async_trait]
impl Module for CategoryModule {
    fn name(&self) -> &'static str {
        "category"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            CATEGORY_MAPPER.singleton(|_| Ok(CategoryMapper)),
            CATEGORY_REPOSITORY_FACTORY
                .singleton(|r| Ok(CategoryRepositoryFactory::new(r.resolve(&CATEGORY_MAPPER)?))),
            CATEGORY_SERVICE
                .singleton(|r| Ok(CategoryService::new(r.resolve(&CATEGORY_REPOSITORY_FACTORY)?))),
        ]);
        Ok(())
    }
}
