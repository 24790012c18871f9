use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::author_book::dto::{AuthorBookDto, AuthorBookMapper};
use crate::domain::author_book::entity;
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
pub struct AuthorBookFilter {
    pub id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub book_id: Option<Uuid>,
}

impl AuthorBookFilter {
    pub fn pair(author_id: Uuid, book_id: Uuid) -> Self {
        Self {
            id: None,
            author_id: Some(author_id),
            book_id: Some(book_id),
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(author_id) = self.author_id {
            condition = condition.add(entity::Column::AuthorId.eq(author_id));
        }
        if let Some(book_id) = self.book_id {
            condition = condition.add(entity::Column::BookId.eq(book_id));
        }
        condition
    }
}

pub struct AuthorBookRepositoryFactory {
    mapper: Arc<AuthorBookMapper>,
}

impl AuthorBookRepositoryFactory {
    pub fn new(mapper: Arc<AuthorBookMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> AuthorBookRepository {
        AuthorBookRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

/// Links are immutable; there is no `update_one`.
pub struct AuthorBookRepository {
    uow: UnitOfWork,
    mapper: Arc<AuthorBookMapper>,
}

impl AuthorBookRepository {
    pub async fn create_one(&self, author_id: Uuid, book_id: Uuid) -> Result<AuthorBookDto> {
        let conn = self.uow.connection().await?;

        if find(&*conn, &AuthorBookFilter::pair(author_id, book_id))
            .await?
            .is_some()
        {
            return Err(ShelfwiseError::already_exists(
                "authorBook",
                format!("authorId={author_id}, bookId={book_id}"),
            ));
        }

        let now = Utc::now();
        let author_book = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            author_id: Set(author_id),
            book_id: Set(book_id),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(author_book))
    }

    pub async fn find_one(&self, filter: &AuthorBookFilter) -> Result<Option<AuthorBookDto>> {
        let conn = self.uow.connection().await?;
        let author_book = find(&*conn, filter).await?;
        Ok(author_book.map(|author_book| self.mapper.map_entity_to_dto(author_book)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<AuthorBookDto>> {
        self.find_one(&AuthorBookFilter {
            id: Some(id),
            ..AuthorBookFilter::default()
        })
        .await
    }

    /// `None` pagination returns every matching link.
    pub async fn find_many(
        &self,
        filter: &AuthorBookFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<AuthorBookDto>> {
        let conn = self.uow.connection().await?;
        let mut query = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt);
        if let Some(pagination) = pagination {
            query = query.offset(pagination.offset()).limit(pagination.limit);
        }
        let author_books = query.all(&*conn).await?;
        Ok(author_books
            .into_iter()
            .map(|author_book| self.mapper.map_entity_to_dto(author_book))
            .collect())
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("authorBook", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(
    conn: &C,
    filter: &AuthorBookFilter,
) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
