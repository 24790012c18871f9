use super::extract::{JsonBody, QueryParams};
use super::{pagination, parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::customer::dto::{CreateCustomerDto, FindCustomersQuery};
use crate::domain::customer::{CustomerDto, CustomerFilter, CustomerService};
use crate::domain::user::AuthPayload;
use crate::error::Result;
use crate::guard::{GuardLayer, ensure_same_user};
use crate::transactional::TransactionRunner;
use axum::{
    Extension, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

pub struct CustomerController {
    runner: Arc<TransactionRunner>,
    service: Arc<CustomerService>,
}

impl CustomerController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<CustomerService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/customers", get(Self::find_customers).post(Self::create_customer))
            .route(
                "/customers/{id}",
                get(Self::find_customer).delete(Self::remove_customer),
            )
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_customer(
        State(this): State<Arc<Self>>,
        Extension(auth): Extension<AuthPayload>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<CustomerDto>> {
        let dto: CreateCustomerDto = parse_body(body)?;
        ensure_same_user(&auth, dto.user_id)?;
        let service = &this.service;
        let customer = this
            .runner
            .run_in_transaction(|uow| async move { service.create_customer(&uow, dto.user_id).await })
            .await?;
        Ok(ApiResponse::created(customer))
    }

    async fn find_customers(
        State(this): State<Arc<Self>>,
        QueryParams(query): QueryParams<FindCustomersQuery>,
    ) -> Result<ApiResponse<Vec<CustomerDto>>> {
        let pagination = pagination(query.page, query.limit)?;
        let filter = CustomerFilter {
            user_id: query.user_id,
            ..CustomerFilter::default()
        };
        let service = &this.service;
        let customers = this
            .runner
            .run_in_transaction(|uow| async move {
                service.find_customers(&uow, &filter, pagination).await
            })
            .await?;
        Ok(ApiResponse::ok(customers))
    }

    async fn find_customer(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<CustomerDto>> {
        let customer_id = parse_id("id", id)?;
        let service = &this.service;
        let customer = this
            .runner
            .run_in_transaction(|uow| async move { service.find_customer(&uow, customer_id).await })
            .await?;
        Ok(ApiResponse::ok(customer))
    }

    async fn remove_customer(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let customer_id = parse_id("id", id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_customer(&uow, customer_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
