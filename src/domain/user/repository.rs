use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::user::dto::{UserDto, UserMapper};
use crate::domain::user::entity::{self, UserRole};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct CreateUserData {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub id: Option<Uuid>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UserFilter {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(email) = &self.email {
            condition = condition.add(entity::Column::Email.eq(email.as_str()));
        }
        if let Some(role) = self.role {
            condition = condition.add(entity::Column::Role.eq(role));
        }
        condition
    }
}

#[derive(Debug, Default, Clone)]
pub struct UpdateUserData {
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

pub struct UserRepositoryFactory {
    mapper: Arc<UserMapper>,
}

impl UserRepositoryFactory {
    pub fn new(mapper: Arc<UserMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> UserRepository {
        UserRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

pub struct UserRepository {
    uow: UnitOfWork,
    mapper: Arc<UserMapper>,
}

impl UserRepository {
    pub async fn create_one(&self, data: CreateUserData) -> Result<UserDto> {
        let conn = self.uow.connection().await?;

        if find(&*conn, &UserFilter::by_email(&data.email)).await?.is_some() {
            return Err(ShelfwiseError::already_exists(
                "user",
                format!("email={}", data.email),
            ));
        }

        let now = Utc::now();
        let user = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            email: Set(data.email),
            password: Set(data.password_hash),
            role: Set(data.role),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(user))
    }

    pub async fn find_one(&self, filter: &UserFilter) -> Result<Option<UserDto>> {
        let conn = self.uow.connection().await?;
        let user = find(&*conn, filter).await?;
        Ok(user.map(|user| self.mapper.map_entity_to_dto(user)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<UserDto>> {
        self.find_one(&UserFilter {
            id: Some(id),
            ..UserFilter::default()
        })
        .await
    }

    pub async fn find_many(
        &self,
        filter: &UserFilter,
        pagination: Pagination,
    ) -> Result<Vec<UserDto>> {
        let conn = self.uow.connection().await?;
        let users = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(users
            .into_iter()
            .map(|user| self.mapper.map_entity_to_dto(user))
            .collect())
    }

    pub async fn update_one(&self, id: Uuid, data: UpdateUserData) -> Result<UserDto> {
        let conn = self.uow.connection().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&*conn)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("user", format!("id={id}")))?;

        let mut user: entity::ActiveModel = existing.into();
        if let Some(password_hash) = data.password_hash {
            user.password = Set(password_hash);
        }
        if let Some(role) = data.role {
            user.role = Set(role);
        }
        user.updated_at = Set(Utc::now());
        let user = user.update(&*conn).await?;

        Ok(self.mapper.map_entity_to_dto(user))
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("user", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(conn: &C, filter: &UserFilter) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
