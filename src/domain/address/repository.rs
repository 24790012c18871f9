use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::address::dto::{AddressDto, AddressMapper, CreateAddressDto, UpdateAddressDto};
use crate::domain::address::entity;
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct AddressFilter {
    pub id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl AddressFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(customer_id) = self.customer_id {
            condition = condition.add(entity::Column::CustomerId.eq(customer_id));
        }
        if let Some(country) = &self.country {
            condition = condition.add(entity::Column::Country.eq(country.as_str()));
        }
        if let Some(city) = &self.city {
            condition = condition.add(entity::Column::City.eq(city.as_str()));
        }
        condition
    }
}

pub struct AddressRepositoryFactory {
    mapper: Arc<AddressMapper>,
}

impl AddressRepositoryFactory {
    pub fn new(mapper: Arc<AddressMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> AddressRepository {
        AddressRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

pub struct AddressRepository {
    uow: UnitOfWork,
    mapper: Arc<AddressMapper>,
}

impl AddressRepository {
    pub async fn create_one(&self, data: CreateAddressDto) -> Result<AddressDto> {
        let conn = self.uow.connection().await?;

        let now = Utc::now();
        let address = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            full_name: Set(data.full_name),
            phone_number: Set(data.phone_number),
            country: Set(data.country),
            state: Set(data.state),
            city: Set(data.city),
            zip_code: Set(data.zip_code),
            street_address: Set(data.street_address),
            delivery_instructions: Set(data.delivery_instructions),
            customer_id: Set(data.customer_id),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(address))
    }

    pub async fn find_one(&self, filter: &AddressFilter) -> Result<Option<AddressDto>> {
        let conn = self.uow.connection().await?;
        let address = entity::Entity::find()
            .filter(filter.condition())
            .one(&*conn)
            .await?;
        Ok(address.map(|address| self.mapper.map_entity_to_dto(address)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<AddressDto>> {
        self.find_one(&AddressFilter {
            id: Some(id),
            ..AddressFilter::default()
        })
        .await
    }

    pub async fn find_many(
        &self,
        filter: &AddressFilter,
        pagination: Pagination,
    ) -> Result<Vec<AddressDto>> {
        let conn = self.uow.connection().await?;
        let addresses = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(addresses
            .into_iter()
            .map(|address| self.mapper.map_entity_to_dto(address))
            .collect())
    }

    pub async fn update_one(&self, id: Uuid, data: UpdateAddressDto) -> Result<AddressDto> {
        let conn = self.uow.connection().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&*conn)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("address", format!("id={id}")))?;

        let mut address: entity::ActiveModel = existing.into();
        if let Some(full_name) = data.full_name {
            address.full_name = Set(full_name);
        }
        if let Some(phone_number) = data.phone_number {
            address.phone_number = Set(phone_number);
        }
        if let Some(country) = data.country {
            address.country = Set(country);
        }
        if let Some(state) = data.state {
            address.state = Set(state);
        }
        if let Some(city) = data.city {
            address.city = Set(city);
        }
        if let Some(zip_code) = data.zip_code {
            address.zip_code = Set(zip_code);
        }
        if let Some(street_address) = data.street_address {
            address.street_address = Set(street_address);
        }
        if let Some(delivery_instructions) = data.delivery_instructions {
            address.delivery_instructions = Set(Some(delivery_instructions));
        }
        address.updated_at = Set(Utc::now());
        let address = address.update(&*conn).await?;

        Ok(self.mapper.map_entity_to_dto(address))
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("address", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}
