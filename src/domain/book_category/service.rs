use crate::common::Pagination;
use crate::domain::book::{BookDto, BookFilter, BookRepositoryFactory};
use crate::domain::book_category::dto::BookCategoryDto;
use crate::domain::book_category::repository::{
    BookCategoryFilter, BookCategoryRepositoryFactory,
};
use crate::domain::category::{CategoryDto, CategoryFilter, CategoryRepositoryFactory};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct BookCategoryService {
    repository_factory: Arc<BookCategoryRepositoryFactory>,
    book_repository_factory: Arc<BookRepositoryFactory>,
    category_repository_factory: Arc<CategoryRepositoryFactory>,
}

impl BookCategoryService {
    pub fn new(
        repository_factory: Arc<BookCategoryRepositoryFactory>,
        book_repository_factory: Arc<BookRepositoryFactory>,
        category_repository_factory: Arc<CategoryRepositoryFactory>,
    ) -> Self {
        Self {
            repository_factory,
            book_repository_factory,
            category_repository_factory,
        }
    }

    pub async fn create_book_category(
        &self,
        uow: &UnitOfWork,
        book_id: Uuid,
        category_id: Uuid,
    ) -> Result<BookCategoryDto> {
        tracing::debug!(book_id = %book_id, category_id = %category_id, "Creating bookCategory");

        self.ensure_book(uow, book_id).await?;
        self.ensure_category(uow, category_id).await?;
        let book_category = self
            .repository_factory
            .create(uow)
            .create_one(book_id, category_id)
            .await?;

        tracing::info!(book_category_id = %book_category.id, "BookCategory created");
        Ok(book_category)
    }

    /// Categories `book_id` is filed under.
    pub async fn find_book_categories(
        &self,
        uow: &UnitOfWork,
        book_id: Uuid,
        filter: CategoryFilter,
        pagination: Pagination,
    ) -> Result<Vec<CategoryDto>> {
        self.ensure_book(uow, book_id).await?;

        let links = self
            .repository_factory
            .create(uow)
            .find_many(
                &BookCategoryFilter {
                    book_id: Some(book_id),
                    ..BookCategoryFilter::default()
                },
                None,
            )
            .await?;
        let filter = CategoryFilter {
            ids: Some(links.into_iter().map(|link| link.category_id).collect()),
            ..filter
        };

        self.category_repository_factory
            .create(uow)
            .find_many(&filter, pagination)
            .await
    }

    pub async fn find_category_books(
        &self,
        uow: &UnitOfWork,
        category_id: Uuid,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDto>> {
        self.ensure_category(uow, category_id).await?;

        let links = self
            .repository_factory
            .create(uow)
            .find_many(
                &BookCategoryFilter {
                    category_id: Some(category_id),
                    ..BookCategoryFilter::default()
                },
                None,
            )
            .await?;
        let filter = BookFilter {
            ids: Some(links.into_iter().map(|link| link.book_id).collect()),
            ..filter
        };

        self.book_repository_factory
            .create(uow)
            .find_many(&filter, pagination)
            .await
    }

    pub async fn remove_book_category(
        &self,
        uow: &UnitOfWork,
        book_id: Uuid,
        category_id: Uuid,
    ) -> Result<()> {
        tracing::debug!(book_id = %book_id, category_id = %category_id, "Removing bookCategory");

        let repository = self.repository_factory.create(uow);
        let book_category = repository
            .find_one(&BookCategoryFilter::pair(book_id, category_id))
            .await?
            .ok_or_else(|| {
                ShelfwiseError::not_found(
                    "bookCategory",
                    format!("bookId={book_id}, categoryId={category_id}"),
                )
            })?;
        repository.remove_one(book_category.id).await?;

        tracing::info!(book_category_id = %book_category.id, "BookCategory removed");
        Ok(())
    }

    async fn ensure_book(&self, uow: &UnitOfWork, book_id: Uuid) -> Result<()> {
        match self
            .book_repository_factory
            .create(uow)
            .find_one_by_id(book_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(ShelfwiseError::not_found("book", format!("id={book_id}"))),
        }
    }

    async fn ensure_category(&self, uow: &UnitOfWork, category_id: Uuid) -> Result<()> {
        match self
            .category_repository_factory
            .create(uow)
            .find_one_by_id(category_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(ShelfwiseError::not_found("category", format!("id={category_id}"))),
        }
    }
}
