use crate::common::Pagination;
use crate::domain::author::dto::{AuthorDto, CreateAuthorDto, UpdateAuthorDto};
use crate::domain::author::repository::{AuthorFilter, AuthorRepositoryFactory};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthorService {
    repository_factory: Arc<AuthorRepositoryFactory>,
}

impl AuthorService {
    pub fn new(repository_factory: Arc<AuthorRepositoryFactory>) -> Self {
        Self { repository_factory }
    }

    pub async fn create_author(&self, uow: &UnitOfWork, data: CreateAuthorDto) -> Result<AuthorDto> {
        tracing::debug!(first_name = %data.first_name, last_name = %data.last_name, "Creating author");
        let author = self.repository_factory.create(uow).create_one(data).await?;
        tracing::info!(author_id = %author.id, "Author created");
        Ok(author)
    }

    pub async fn find_author(&self, uow: &UnitOfWork, author_id: Uuid) -> Result<AuthorDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(author_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("author", format!("id={author_id}")))
    }

    pub async fn find_authors(
        &self,
        uow: &UnitOfWork,
        filter: &AuthorFilter,
        pagination: Pagination,
    ) -> Result<Vec<AuthorDto>> {
        self.repository_factory
            .create(uow)
            .find_many(filter, pagination)
            .await
    }

    pub async fn update_author(
        &self,
        uow: &UnitOfWork,
        author_id: Uuid,
        data: UpdateAuthorDto,
    ) -> Result<AuthorDto> {
        let author = self
            .repository_factory
            .create(uow)
            .update_one(author_id, data)
            .await?;
        tracing::info!(author_id = %author_id, "Author updated");
        Ok(author)
    }

    pub async fn remove_author(&self, uow: &UnitOfWork, author_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(author_id).await?;
        tracing::info!(author_id = %author_id, "Author removed");
        Ok(())
    }
}
