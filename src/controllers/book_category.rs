use super::book::book_filter;
use super::category::category_filter;
use super::extract::QueryParams;
use super::{pagination, parse_id};
use crate::common::ApiResponse;
use crate::domain::book::BookDto;
use crate::domain::book::dto::FindBooksQuery;
use crate::domain::book_category::{BookCategoryDto, BookCategoryService};
use crate::domain::category::CategoryDto;
use crate::domain::category::dto::FindCategoriesQuery;
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

pub struct BookCategoryController {
    runner: Arc<TransactionRunner>,
    service: Arc<BookCategoryService>,
}

impl BookCategoryController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<BookCategoryService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route(
                "/books/{id}/categories/{categoryId}",
                post(Self::create_book_category).delete(Self::remove_book_category),
            )
            .route("/books/{id}/categories", get(Self::find_book_categories))
            .route("/categories/{id}/books", get(Self::find_category_books))
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_book_category(
        State(this): State<Arc<Self>>,
        Path((book_id, category_id)): Path<(String, String)>,
    ) -> Result<ApiResponse<BookCategoryDto>> {
        let book_id = parse_id("bookId", book_id)?;
        let category_id = parse_id("categoryId", category_id)?;
        let service = &this.service;
        let book_category = this
            .runner
            .run_in_transaction(|uow| async move {
                service.create_book_category(&uow, book_id, category_id).await
            })
            .await?;
        Ok(ApiResponse::created(book_category))
    }

    async fn remove_book_category(
        State(this): State<Arc<Self>>,
        Path((book_id, category_id)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        let book_id = parse_id("bookId", book_id)?;
        let category_id = parse_id("categoryId", category_id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move {
                service.remove_book_category(&uow, book_id, category_id).await
            })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn find_book_categories(
        State(this): State<Arc<Self>>,
        Path(book_id): Path<String>,
        QueryParams(query): QueryParams<FindCategoriesQuery>,
    ) -> Result<ApiResponse<Vec<CategoryDto>>> {
        let book_id = parse_id("bookId", book_id)?;
        let pagination = pagination(query.page, query.limit)?;
        let filter = category_filter(query);
        let service = &this.service;
        let categories = this
            .runner
            .run_in_transaction(|uow| async move {
                service
                    .find_book_categories(&uow, book_id, filter, pagination)
                    .await
            })
            .await?;
        Ok(ApiResponse::ok(categories))
    }

    async fn find_category_books(
        State(this): State<Arc<Self>>,
        Path(category_id): Path<String>,
        QueryParams(query): QueryParams<FindBooksQuery>,
    ) -> Result<ApiResponse<Vec<BookDto>>> {
        let category_id = parse_id("categoryId", category_id)?;
        let pagination = pagination(query.page, query.limit)?;
        let filter = book_filter(query);
        let service = &this.service;
        let books = this
            .runner
            .run_in_transaction(|uow| async move {
                service
                    .find_category_books(&uow, category_id, filter, pagination)
                    .await
            })
            .await?;
        Ok(ApiResponse::ok(books))
    }
}
