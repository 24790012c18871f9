use super::extract::{JsonBody, QueryParams};
use super::{pagination, parse_body, parse_id};
use crate::common::ApiResponse;
use crate::domain::address::dto::{CreateAddressDto, FindAddressesQuery, UpdateAddressDto};
use crate::domain::address::{AddressDto, AddressFilter, AddressService};
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

pub struct AddressController {
    runner: Arc<TransactionRunner>,
    service: Arc<AddressService>,
}

impl AddressController {
    pub fn new(runner: Arc<TransactionRunner>, service: Arc<AddressService>) -> Self {
        Self { runner, service }
    }

    pub fn router(self: Arc<Self>, guard: GuardLayer) -> Router {
        Router::new()
            .route("/addresses", get(Self::find_addresses).post(Self::create_address))
            .route(
                "/addresses/{id}",
                get(Self::find_address)
                    .patch(Self::update_address)
                    .delete(Self::remove_address),
            )
            .route_layer(guard)
            .with_state(self)
    }

    async fn create_address(
        State(this): State<Arc<Self>>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<AddressDto>> {
        let dto: CreateAddressDto = parse_body(body)?;
        let service = &this.service;
        let address = this
            .runner
            .run_in_transaction(|uow| async move { service.create_address(&uow, dto).await })
            .await?;
        Ok(ApiResponse::created(address))
    }

    async fn find_addresses(
        State(this): State<Arc<Self>>,
        QueryParams(query): QueryParams<FindAddressesQuery>,
    ) -> Result<ApiResponse<Vec<AddressDto>>> {
        let pagination = pagination(query.page, query.limit)?;
        let filter = AddressFilter {
            customer_id: query.customer_id,
            country: query.country,
            city: query.city,
            ..AddressFilter::default()
        };
        let service = &this.service;
        let addresses = this
            .runner
            .run_in_transaction(|uow| async move {
                service.find_addresses(&uow, &filter, pagination).await
            })
            .await?;
        Ok(ApiResponse::ok(addresses))
    }

    async fn find_address(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<ApiResponse<AddressDto>> {
        let address_id = parse_id("id", id)?;
        let service = &this.service;
        let address = this
            .runner
            .run_in_transaction(|uow| async move { service.find_address(&uow, address_id).await })
            .await?;
        Ok(ApiResponse::ok(address))
    }

    async fn update_address(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody,
    ) -> Result<ApiResponse<AddressDto>> {
        let address_id = parse_id("id", id)?;
        let dto: UpdateAddressDto = parse_body(body)?;
        let service = &this.service;
        let address = this
            .runner
            .run_in_transaction(|uow| async move {
                service.update_address(&uow, address_id, dto).await
            })
            .await?;
        Ok(ApiResponse::ok(address))
    }

    async fn remove_address(
        State(this): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let address_id = parse_id("id", id)?;
        let service = &this.service;
        this.runner
            .run_in_transaction(|uow| async move { service.remove_address(&uow, address_id).await })
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
