use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::category::dto::{CategoryDto, CategoryMapper};
use crate::domain::category::entity;
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
pub struct CategoryFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub name: Option<String>,
    pub name_contains: Option<String>,
}

impl CategoryFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(ids) = &self.ids {
            condition = condition.add(entity::Column::Id.is_in(ids.iter().copied()));
        }
        if let Some(name) = &self.name {
            condition = condition.add(entity::Column::Name.eq(name.as_str()));
        }
        if let Some(fragment) = &self.name_contains {
            condition = condition.add(entity::Column::Name.contains(fragment));
        }
        condition
    }
}

pub struct CategoryRepositoryFactory {
    mapper: Arc<CategoryMapper>,
}

impl CategoryRepositoryFactory {
    pub fn new(mapper: Arc<CategoryMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> CategoryRepository {
        CategoryRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

pub struct CategoryRepository {
    uow: UnitOfWork,
    mapper: Arc<CategoryMapper>,
}

impl CategoryRepository {
    pub async fn create_one(&self, name: String) -> Result<CategoryDto> {
        let conn = self.uow.connection().await?;

        if find(&*conn, &CategoryFilter::by_name(&name)).await?.is_some() {
            return Err(ShelfwiseError::already_exists("category", format!("name={name}")));
        }

        let now = Utc::now();
        let category = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            name: Set(name),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(category))
    }

    pub async fn find_one(&self, filter: &CategoryFilter) -> Result<Option<CategoryDto>> {
        let conn = self.uow.connection().await?;
        let category = find(&*conn, filter).await?;
        Ok(category.map(|category| self.mapper.map_entity_to_dto(category)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<CategoryDto>> {
        self.find_one(&CategoryFilter {
            id: Some(id),
            ..CategoryFilter::default()
        })
        .await
    }

    pub async fn find_many(
        &self,
        filter: &CategoryFilter,
        pagination: Pagination,
    ) -> Result<Vec<CategoryDto>> {
        let conn = self.uow.connection().await?;
        let categories = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(categories
            .into_iter()
            .map(|category| self.mapper.map_entity_to_dto(category))
            .collect())
    }

    pub async fn update_one(&self, id: Uuid, name: String) -> Result<CategoryDto> {
        let conn = self.uow.connection().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&*conn)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("category", format!("id={id}")))?;

        if name != existing.name && find(&*conn, &CategoryFilter::by_name(&name)).await?.is_some() {
            return Err(ShelfwiseError::already_exists("category", format!("name={name}")));
        }

        let mut category: entity::ActiveModel = existing.into();
        category.name = Set(name);
        category.updated_at = Set(Utc::now());
        let category = category.update(&*conn).await?;

        Ok(self.mapper.map_entity_to_dto(category))
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("category", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(
    conn: &C,
    filter: &CategoryFilter,
) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
