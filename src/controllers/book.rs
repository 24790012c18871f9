use super::extract::{JsonBody, QueryParams};
use super::{pagination, parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::book::dto::{CreateBookDto, FindBooksQuery, UpdateBookDto};
use crate::domain::book::{BookDto, BookFilter, BookService};
use crate::error::Result;
use crate::guard::GuardLayer;
use crate::transactional::TransactionRunner;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

pub struct BookController {
    runner: Arc<TransactionRunner>,
    service: Arc<BookService>,
}

impl BookController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<BookService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/books", get(Self::find_books).post(Self::create_book))
            .route(
                "/books/{id}",
                get(Self::find_book)
                    .patch(Self::update_book)
                    .delete(Self::remove_book),
            )
            .route_layer(guard)
            .with_state(self)
    }

    /// The book and its author links are written in one unit of work.
    async fn create_book(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<BookDto>> {
        let dto: CreateBookDto = parse_body(body)?;
        let service = &this.service;
        let book = this
            .runner
            .run_in_transaction(|uow| async move { service.create_book(&uow, dto).await })
            .await?;
        Ok(ApiResponse::created(book))
    }

    async fn find_books(
        State(this): State<Arc<Self>>,
        QueryParams(query): QueryParams<FindBooksQuery>,
    ) -> Result<ApiResponse<Vec<BookDto>>> {
        let pagination = pagination(query.page, query.limit)?;
        let filter = book_filter(query);
        let service = &this.service;
        let books = this
            .runner
            .run_in_transaction(|uow| async move { service.find_books(&uow, &filter, pagination).await })
            .await?;
        Ok(ApiResponse::ok(books))
    }

    async fn find_book(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<BookDto>> {
        let book_id = parse_id("id", id)?;
        let service = &this.service;
        let book = this
            .runner
            .run_in_transaction(|uow| async move { service.find_book(&uow, book_id).await })
            .await?;
        Ok(ApiResponse::ok(book))
    }

    async fn update_book(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<BookDto>> {
        let book_id = parse_id("id", id)?;
        let dto: UpdateBookDto = parse_body(body)?;
        let service = &this.service;
        let book = this
            .runner
            .run_in_transaction(|uow| async move { service.update_book(&uow, book_id, dto).await })
            .await?;
        Ok(ApiResponse::ok(book))
    }

    async fn remove_book(State(this): State<Arc<Self>>, Path(id): Path<String>) -> Result<StatusCode> {
        let book_id = parse_id("id", id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_book(&uow, book_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

/// `title` in a query matches by substring.
pub(super) fn book_filter(query: FindBooksQuery) -> BookFilter {
    BookFilter {
        title_contains: query.title,
        release_year: query.release_year,
        language: query.language,
        format: query.format,
        ..BookFilter::default()
    }
}
