use super::author::author_filter;
use super::book::book_filter;
use super::extract::QueryParams;
use super::{pagination, parse_id};
use crate::common::ApiResponse;
use crate::domain::author::AuthorDto;
use crate::domain::author::dto::FindAuthorsQuery;
use crate::domain::author_book::{AuthorBookDto, AuthorBookService};
use crate::domain::book::BookDto;
use crate::domain::book::dto::FindBooksQuery;
use crate::error::Result;
use crate::guard::GuardLayer;
use crate::transactional::TransactionRunner;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub struct AuthorBookController {
    runner: Arc<TransactionRunner>,
    service: Arc<AuthorBookService>,
}

impl AuthorBookController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<AuthorBookService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route(
                "/authors/{id}/books/{bookId}",
                post(Self::create_author_book).delete(Self::remove_author_book),
            )
            .route("/authors/{id}/books", get(Self::find_author_books))
            .route("/books/{id}/authors", get(Self::find_book_authors))
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_author_book(
        State(this): State<Arc<Self>>,
        Path((author_id, book_id)): Path<(String, String)>,
    ) -> Result<ApiResponse<AuthorBookDto>> {
        let author_id = parse_id("authorId", author_id)?;
        let book_id = parse_id("bookId", book_id)?;
        let service = &this.service;
        let author_book = this
            .runner
            .run_in_transaction(|uow| async move {
                service.create_author_book(&uow, author_id, book_id).await
            })
            .await?;
        Ok(ApiResponse::created(author_book))
    }

    async fn remove_author_book(
        State(this): State<Arc<Self>>,
        Path((author_id, book_id)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        let author_id = parse_id("authorId", author_id)?;
        let book_id = parse_id("bookId", book_id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move {
                service.remove_author_book(&uow, author_id, book_id).await
            })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn find_author_books(
        State(this): State<Arc<Self>>,
        Path(author_id): Path<String>,
        QueryParams(query): QueryParams<FindBooksQuery>,
    ) -> Result<ApiResponse<Vec<BookDto>>> {
        let author_id = parse_id("authorId", author_id)?;
        let pagination = pagination(query.page, query.limit)?;
        let filter = book_filter(query);
        let service = &this.service;
        let books = this
            .runner
            .run_in_transaction(|uow| async move {
                service
                    .find_author_books(&uow, author_id, filter, pagination)
                    .await
            })
            .await?;
        Ok(ApiResponse::ok(books))
    }

    async fn find_book_authors(
        State(this): State<Arc<Self>>,
        Path(book_id): Path<String>,
        QueryParams(query): QueryParams<FindAuthorsQuery>,
    ) -> Result<ApiResponse<Vec<AuthorDto>>> {
        let book_id = parse_id("bookId", book_id)?;
        let pagination = pagination(query.page, query.limit)?;
        let filter = author_filter(query);
        let service = &this.service;
        let authors = this
            .runner
            .run_in_transaction(|uow| async move {
                service
                    .find_book_authors(&uow, book_id, filter, pagination)
                    .await
            })
            .await?;
        Ok(ApiResponse::ok(authors))
    }
}
