use crate::common::Pagination;
use crate::domain::author::{AuthorDto, AuthorFilter, AuthorRepositoryFactory};
use crate::domain::author_book::dto::AuthorBookDto;
use crate::domain::author_book::repository::{AuthorBookFilter, AuthorBookRepositoryFactory};
use crate::domain::book::{BookDto, BookFilter, BookRepositoryFactory};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthorBookService {
    repository_factory: Arc<AuthorBookRepositoryFactory>,
    author_repository_factory: Arc<AuthorRepositoryFactory>,
    book_repository_factory: Arc<BookRepositoryFactory>,
}

impl AuthorBookService {
    pub fn new(
        repository_factory: Arc<AuthorBookRepositoryFactory>,
        author_repository_factory: Arc<AuthorRepositoryFactory>,
        book_repository_factory: Arc<BookRepositoryFactory>,
    ) -> Self {
        Self {
            repository_factory,
            author_repository_factory,
            book_repository_factory,
        }
    }

    pub async fn create_author_book(
        &self,
        uow: &UnitOfWork,
        author_id: Uuid,
        book_id: Uuid,
    ) -> Result<AuthorBookDto> {
        tracing::debug!(author_id = %author_id, book_id = %book_id, "Creating authorBook");

        self.ensure_author(uow, author_id).await?;
        self.ensure_book(uow, book_id).await?;
        let author_book = self
            .repository_factory
            .create(uow)
            .create_one(author_id, book_id)
            .await?;

        tracing::info!(author_book_id = %author_book.id, "AuthorBook created");
        Ok(author_book)
    }

    /// Books written by `author_id`, narrowed by `filter`.
    pub async fn find_author_books(
        &self,
        uow: &UnitOfWork,
        author_id: Uuid,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDto>> {
        self.ensure_author(uow, author_id).await?;

        let links = self
            .repository_factory
            .create(uow)
            .find_many(
                &AuthorBookFilter {
                    author_id: Some(author_id),
                    ..AuthorBookFilter::default()
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

    /// Authors of `book_id`, narrowed by `filter`.
    pub async fn find_book_authors(
        &self,
        uow: &UnitOfWork,
        book_id: Uuid,
        filter: AuthorFilter,
        pagination: Pagination,
    ) -> Result<Vec<AuthorDto>> {
        self.ensure_book(uow, book_id).await?;

        let links = self
            .repository_factory
            .create(uow)
            .find_many(
                &AuthorBookFilter {
                    book_id: Some(book_id),
                    ..AuthorBookFilter::default()
                },
                None,
            )
            .await?;
        let filter = AuthorFilter {
            ids: Some(links.into_iter().map(|link| link.author_id).collect()),
            ..filter
        };

        self.author_repository_factory
            .create(uow)
            .find_many(&filter, pagination)
            .await
    }

    pub async fn remove_author_book(
        &self,
        uow: &UnitOfWork,
        author_id: Uuid,
        book_id: Uuid,
    ) -> Result<()> {
        tracing::debug!(author_id = %author_id, book_id = %book_id, "Removing authorBook");

        let repository = self.repository_factory.create(uow);
        let author_book = repository
            .find_one(&AuthorBookFilter::pair(author_id, book_id))
            .await?
            .ok_or_else(|| {
                ShelfwiseError::not_found(
                    "authorBook",
                    format!("authorId={author_id}, bookId={book_id}"),
                )
            })?;
        repository.remove_one(author_book.id).await?;

        tracing::info!(author_book_id = %author_book.id, "AuthorBook removed");
        Ok(())
    }

    async fn ensure_author(&self, uow: &UnitOfWork, author_id: Uuid) -> Result<()> {
        match self
            .author_repository_factory
            .create(uow)
            .find_one_by_id(author_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(ShelfwiseError::not_found("author", format!("id={author_id}"))),
        }
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
}
