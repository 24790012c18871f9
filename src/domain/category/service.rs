use crate::common::Pagination;
use crate::domain::category::dto::CategoryDto;
use crate::domain::category::repository::{CategoryFilter, CategoryRepositoryFactory};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryService {
    repository_factory: Arc<CategoryRepositoryFactory>,
}

impl CategoryService {
    pub fn new(repository_factory: Arc<CategoryRepositoryFactory>) -> Self {
        Self { repository_factory }
    }

    pub async fn create_category(&self, uow: &UnitOfWork, name: String) -> Result<CategoryDto> {
        tracing::debug!(name = %name, "Creating category");
        let category = self.repository_factory.create(uow).create_one(name).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    pub async fn find_category(&self, uow: &UnitOfWork, category_id: Uuid) -> Result<CategoryDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(category_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("category", format!("id={category_id}")))
    }

    pub async fn find_categories(
        &self,
        uow: &UnitOfWork,
        filter: &CategoryFilter,
        pagination: Pagination,
    ) -> Result<Vec<CategoryDto>> {
        self.repository_factory
            .create(uow)
            .find_many(filter, pagination)
            .await
    }

    pub async fn update_category(
        &self,
        uow: &UnitOfWork,
        category_id: Uuid,
        name: String,
    ) -> Result<CategoryDto> {
        let category = self
            .repository_factory
            .create(uow)
            .update_one(category_id, name)
            .await?;
        tracing::info!(category_id = %category_id, "Category updated");
        Ok(category)
    }

    pub async fn remove_category(&self, uow: &UnitOfWork, category_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(category_id).await?;
        tracing::info!(category_id = %category_id, "Category removed");
        Ok(())
    }
}
