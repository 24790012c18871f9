use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::customer::dto::{CustomerDto, CustomerMapper};
use crate::domain::customer::entity;
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct CustomerFilter {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl CustomerFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(user_id) = self.user_id {
            condition = condition.add(entity::Column::UserId.eq(user_id));
        }
        condition
    }
}

pub struct CustomerRepositoryFactory {
    mapper: Arc<CustomerMapper>,
}

impl CustomerRepositoryFactory {
    pub fn new(mapper: Arc<CustomerMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> CustomerRepository {
        CustomerRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

/// Customers have no mutable fields, so there is no `update_one`.
pub struct CustomerRepository {
    uow: UnitOfWork,
    mapper: Arc<CustomerMapper>,
}

impl CustomerRepository {
    pub async fn create_one(&self, user_id: Uuid) -> Result<CustomerDto> {
        let conn = self.uow.connection().await?;

        let filter = CustomerFilter {
            user_id: Some(user_id),
            ..CustomerFilter::default()
        };
        if find(&*conn, &filter).await?.is_some() {
            return Err(ShelfwiseError::already_exists(
                "customer",
                format!("userId={user_id}"),
            ));
        }

        let now = Utc::now();
        let customer = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            user_id: Set(user_id),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(customer))
    }

    pub async fn find_one(&self, filter: &CustomerFilter) -> Result<Option<CustomerDto>> {
        let conn = self.uow.connection().await?;
        let customer = find(&*conn, filter).await?;
        Ok(customer.map(|customer| self.mapper.map_entity_to_dto(customer)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<CustomerDto>> {
        self.find_one(&CustomerFilter {
            id: Some(id),
            ..CustomerFilter::default()
        })
        .await
    }

    pub async fn find_many(
        &self,
        filter: &CustomerFilter,
        pagination: Pagination,
    ) -> Result<Vec<CustomerDto>> {
        let conn = self.uow.connection().await?;
        let customers = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(customers
            .into_iter()
            .map(|customer| self.mapper.map_entity_to_dto(customer))
            .collect())
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("customer", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(
    conn: &C,
    filter: &CustomerFilter,
) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
