use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::author::dto::{AuthorDto, AuthorMapper, CreateAuthorDto, UpdateAuthorDto};
use crate::domain::author::entity;
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
pub struct AuthorFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorFilter {
    pub fn by_name(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
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
        if let Some(first_name) = &self.first_name {
            condition = condition.add(entity::Column::FirstName.eq(first_name.as_str()));
        }
        if let Some(last_name) = &self.last_name {
            condition = condition.add(entity::Column::LastName.eq(last_name.as_str()));
        }
        condition
    }
}

pub struct AuthorRepositoryFactory {
    mapper: Arc<AuthorMapper>,
}

impl AuthorRepositoryFactory {
    pub fn new(mapper: Arc<AuthorMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> AuthorRepository {
        AuthorRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

pub struct AuthorRepository {
    uow: UnitOfWork,
    mapper: Arc<AuthorMapper>,
}

impl AuthorRepository {
    pub async fn create_one(&self, data: CreateAuthorDto) -> Result<AuthorDto> {
        let conn = self.uow.connection().await?;

        let filter = AuthorFilter::by_name(&data.first_name, &data.last_name);
        if find(&*conn, &filter).await?.is_some() {
            return Err(ShelfwiseError::already_exists(
                "author",
                format!("firstName={}, lastName={}", data.first_name, data.last_name),
            ));
        }

        let now = Utc::now();
        let author = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            about: Set(data.about),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(author))
    }

    pub async fn find_one(&self, filter: &AuthorFilter) -> Result<Option<AuthorDto>> {
        let conn = self.uow.connection().await?;
        let author = find(&*conn, filter).await?;
        Ok(author.map(|author| self.mapper.map_entity_to_dto(author)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<AuthorDto>> {
        self.find_one(&AuthorFilter {
            id: Some(id),
            ..AuthorFilter::default()
        })
        .await
    }

    pub async fn find_many(
        &self,
        filter: &AuthorFilter,
        pagination: Pagination,
    ) -> Result<Vec<AuthorDto>> {
        let conn = self.uow.connection().await?;
        let authors = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(authors
            .into_iter()
            .map(|author| self.mapper.map_entity_to_dto(author))
            .collect())
    }

    pub async fn update_one(&self, id: Uuid, data: UpdateAuthorDto) -> Result<AuthorDto> {
        let conn = self.uow.connection().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&*conn)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("author", format!("id={id}")))?;

        let mut author: entity::ActiveModel = existing.into();
        if let Some(about) = data.about {
            author.about = Set(Some(about));
        }
        author.updated_at = Set(Utc::now());
        let author = author.update(&*conn).await?;

        Ok(self.mapper.map_entity_to_dto(author))
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("author", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(conn: &C, filter: &AuthorFilter) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
