use crate::common::Pagination;
use crate::domain::address::dto::{AddressDto, CreateAddressDto, UpdateAddressDto};
use crate::domain::address::repository::{AddressFilter, AddressRepositoryFactory};
use crate::domain::customer::CustomerRepositoryFactory;
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use std::sync::Arc;
use uuid::Uuid;

pub struct AddressService {
    repository_factory: Arc<AddressRepositoryFactory>,
    customer_repository_factory: Arc<CustomerRepositoryFactory>,
}

impl AddressService {
    pub fn new(
        repository_factory: Arc<AddressRepositoryFactory>,
        customer_repository_factory: Arc<CustomerRepositoryFactory>,
    ) -> Self {
        Self {
            repository_factory,
            customer_repository_factory,
        }
    }

    pub async fn create_address(&self, uow: &UnitOfWork, data: CreateAddressDto) -> Result<AddressDto> {
        tracing::debug!(customer_id = %data.customer_id, "Creating address");

        let customer_id = data.customer_id;
        if self
            .customer_repository_factory
            .create(uow)
            .find_one_by_id(customer_id)
            .await?
            .is_none()
        {
            return Err(ShelfwiseError::not_found("customer", format!("id={customer_id}")));
        }

        let address = self.repository_factory.create(uow).create_one(data).await?;
        tracing::info!(address_id = %address.id, "Address created");
        Ok(address)
    }

    pub async fn find_address(&self, uow: &UnitOfWork, address_id: Uuid) -> Result<AddressDto> {
        self.repository_factory
            .create(uow)
            .find_one_by_id(address_id)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("address", format!("id={address_id}")))
    }

    pub async fn find_addresses(
        &self,
        uow: &UnitOfWork,
        filter: &AddressFilter,
        pagination: Pagination,
    ) -> Result<Vec<AddressDto>> {
        self.repository_factory
            .create(uow)
            .find_many(filter, pagination)
            .await
    }

    pub async fn update_address(
        &self,
        uow: &UnitOfWork,
        address_id: Uuid,
        data: UpdateAddressDto,
    ) -> Result<AddressDto> {
        let address = self
            .repository_factory
            .create(uow)
            .update_one(address_id, data)
            .await?;
        tracing::info!(address_id = %address_id, "Address updated");
        Ok(address)
    }

    pub async fn remove_address(&self, uow: &UnitOfWork, address_id: Uuid) -> Result<()> {
        self.repository_factory.create(uow).remove_one(address_id).await?;
        tracing::info!(address_id = %address_id, "Address removed");
        Ok(())
    }
}
