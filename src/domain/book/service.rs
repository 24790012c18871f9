use crate::common::Pagination;
use crate::domain::author::AuthorRepositoryFactory;
use crate::domain::author_book::AuthorBookRepositoryFactory;
use crate::domain::book::dto::{BookDto, CreateBookDto, UpdateBookDto};
use crate::domain::book::repository::{BookFilter, BookRepositoryFactory, CreateBookData};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct BookService {
    repository_factory: Arc<BookRepositoryFactory>,
    author_repository_factory: Arc<AuthorRepositoryFactory>,
    author_book_repository_factory: Arc<AuthorBookRepositoryFactory>,
}

impl BookService {
    pub fn new(
        repository_factory: Arc<BookRepositoryFactory>,
        author_repository_factory: Arc<AuthorRepositoryFactory>,
        author_book_repository_factory: Arc<AuthorBookRepositoryFactory>,
    ) -> Self {
        Self {
            repository_factory,
            author_repository_factory,
            author_book_repository_factory,
        }
    }

    /// Creates the book and links it to `data.author_ids`.
    ///
    /// Every write goes through `uow`, so a failing link (unknown author,
    /// duplicate id) leaves no book behind once the caller rolls back.
    pub async fn create_book(&self, uow: &UnitOfWork, data: CreateBookDto) -> Result<BookDto> {
        tracing::debug!(title = %data.title, authors = data.author_ids.len(), "Creating book");

        let book = self
            .repository_factory
            .create(uow)
            .create_one(CreateBookData {
                title: data.title,
                release_year: data.release_year,
                language: data.language,
                format: data.format,
                description: data.description,
                price: data.price,
            })
            .await?;

        let authors = self.author_repository_factory.create(uow);
        let author_books = self.author_book_repository_factory.create(uow);
        for author_id in data.author_ids {
            if authors.find_one_by_id(author_id).await?.is_none() {
                return Err(ShelfwiseError::not_found("author", format!("id={author_id}")));
            }
            author_books.create_one(author_id, book.id).await?;
        }

        tracing::info!(book_id = %book.id, "Book created");
        Ok(book)
    }

    pub async fn find_book(&self, uow: &UnitOfWork, book_id: Uuid) -> Result<BookDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(book_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("book", format!("id={book_id}")))
    }

    pub async fn find_books(
        &self,
        uow: &UnitOfWork,
        filter: &BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDto>> {
        self.repository_factory
            .create(uow)
            .find_many(filter, pagination)
            .await
    }

    pub async fn update_book(
        &self,
        uow: &UnitOfWork,
        book_id: Uuid,
        data: UpdateBookDto,
    ) -> Result<BookDto> {
        let book = self
            .repository_factory
            .create(uow)
            .update_one(book_id, data)
            .await?;
        tracing::info!(book_id = %book_id, "Book updated");
        Ok(book)
    }

    pub async fn remove_book(&self, uow: &UnitOfWork, book_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(book_id).await?;
        tracing::info!(book_id = %book_id, "Book removed");
        Ok(())
    }
}
