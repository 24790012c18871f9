use super::extract::{JsonBody, QueryParams};
use super::{pagination, parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::category::dto::{CategoryNameDto, FindCategoriesQuery};
use crate::domain::category::{CategoryDto, CategoryFilter, CategoryService};
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

pub struct CategoryController {
    runner: Arc<TransactionRunner>,
    service: Arc<CategoryService>,
}

impl CategoryController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<CategoryService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/categories", get(Self::find_categories).post(Self::create_category))
            .route(
                "/categories/{id}",
                get(Self::find_category)
                    .patch(Self::update_category)
                    .delete(Self::remove_category),
            )
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_category(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<CategoryDto>> {
        let dto: CategoryNameDto = parse_body(body)?;
        let service = &this.service;
        let category = this
            .runner
            .run_in_transaction(|uow| async move { service.create_category(&uow, dto.name).await })
            .await?;
        Ok(ApiResponse::created(category))
    }

    async fn find_categories(
        State(this): State<Arc<Self>>,
        QueryParams(query): QueryParams<FindCategoriesQuery>,
    ) -> Result<ApiResponse<Vec<CategoryDto>>> {
        let pagination = pagination(query.page, query.limit)?;
        let filter = category_filter(query);
        let service = &this.service;
        let categories = this
            .runner
            .run_in_transaction(|uow| async move {
                service.find_categories(&uow, &filter, pagination).await
            })
            .await?;
        Ok(ApiResponse::ok(categories))
    }

    async fn find_category(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<CategoryDto>> {
        let category_id = parse_id("id", id)?;
        let service = &this.service;
        let category = this
            .runner
            .run_in_transaction(|uow| async move { service.find_category(&uow, category_id).await })
            .await?;
        Ok(ApiResponse::ok(category))
    }

    async fn update_category(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<CategoryDto>> {
        let category_id = parse_id("id", id)?;
        let dto: CategoryNameDto = parse_body(body)?;
        let service = &this.service;
        let category = this
            .runner
            .run_in_transaction(|uow| async move {
                service.update_category(&uow, category_id, dto.name).await
            })
            .await?;
        Ok(ApiResponse::ok(category))
    }

    async fn remove_category(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let category_id = parse_id("id", id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_category(&uow, category_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

pub(super) fn category_filter(query: FindCategoriesQuery) -> CategoryFilter {
    CategoryFilter {
        name_contains: query.name,
        ..CategoryFilter::default()
    }
}
