use super::extract::{JsonBody, QueryParams};
use super::{pagination, parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::author::dto::{CreateAuthorDto, FindAuthorsQuery, UpdateAuthorDto};
use crate::domain::author::{AuthorDto, AuthorFilter, AuthorService};
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

pub struct AuthorController {
    runner: Arc<TransactionRunner>,
    service: Arc<AuthorService>,
}

impl AuthorController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<AuthorService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/authors", get(Self::find_authors).post(Self::create_author))
            .route(
                "/authors/{id}",
                get(Self::find_author)
                    .patch(Self::update_author)
                    .delete(Self::remove_author),
            )
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_author(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<AuthorDto>> {
        let dto: CreateAuthorDto = parse_body(body)?;
        let service = &this.service;
        let author = this
            .runner
            .run_in_transaction(|uow| async move { service.create_author(&uow, dto).await })
            .await?;
        Ok(ApiResponse::created(author))
    }

    async fn find_authors(
        State(this): State<Arc<Self>>,
        QueryParams(query): QueryParams<FindAuthorsQuery>,
    ) -> Result<ApiResponse<Vec<AuthorDto>>> {
        let pagination = pagination(query.page, query.limit)?;
        let filter = author_filter(query);
        let service = &this.service;
        let authors = this
            .runner
            .run_in_transaction(|uow| async move {
                service.find_authors(&uow, &filter, pagination).await
            })
            .await?;
        Ok(ApiResponse::ok(authors))
    }

    async fn find_author(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<AuthorDto>> {
        let author_id = parse_id("id", id)?;
        let service = &this.service;
        let author = this
            .runner
            .run_in_transaction(|uow| async move { service.find_author(&uow, author_id).await })
            .await?;
        Ok(ApiResponse::ok(author))
    }

    async fn update_author(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<AuthorDto>> {
        let author_id = parse_id("id", id)?;
        let dto: UpdateAuthorDto = parse_body(body)?;
        let service = &this.service;
        let author = this
            .runner
            .run_in_transaction(|uow| async move { service.update_author(&uow, author_id, dto).await })
            .await?;
        Ok(ApiResponse::ok(author))
    }

    async fn remove_author(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let author_id = parse_id("id", id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_author(&uow, author_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

pub(super) fn author_filter(query: FindAuthorsQuery) -> AuthorFilter {
    AuthorFilter {
        first_name: query.first_name,
        last_name: query.last_name,
        ..AuthorFilter::default()
    }
}
