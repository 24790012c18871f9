use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::book_category::dto::{BookCategoryDto, BookCategoryMapper};
use crate::domain::book_category::entity;
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
pub struct BookCategoryFilter {
    pub id: Option<Uuid>,
    pub book_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

impl BookCategoryFilter {
    pub fn pair(book_id: Uuid, category_id: Uuid) -> Self {
        Self {
            id: None,
            book_id: Some(book_id),
            category_id: Some(category_id),
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(entity::Column::Id.eq(id));
        }
        if let Some(book_id) = self.book_id {
            condition = condition.add(entity::Column::BookId.eq(book_id));
        }
        if let Some(category_id) = self.category_id {
            condition = condition.add(entity::Column::CategoryId.eq(category_id));
        }
        condition
    }
}

pub struct BookCategoryRepositoryFactory {
    mapper: Arc<BookCategoryMapper>,
}

impl BookCategoryRepositoryFactory {
    pub fn new(mapper: Arc<BookCategoryMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> BookCategoryRepository {
        BookCategoryRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

/// Links are immutable.
pub struct BookCategoryRepository {
    uow: UnitOfWork,
    mapper: Arc<BookCategoryMapper>,
}

impl BookCategoryRepository {
    pub async fn create_one(&self, book_id: Uuid, category_id: Uuid) -> Result<BookCategoryDto> {
        let conn = self.uow.connection().await?;

        if find(&*conn, &BookCategoryFilter::pair(book_id, category_id))
            .await?
            .is_some()
        {
            return Err(ShelfwiseError::already_exists(
                "bookCategory",
                format!("bookId={book_id}, categoryId={category_id}"),
            ));
        }

        let now = Utc::now();
        let book_category = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            book_id: Set(book_id),
            category_id: Set(category_id),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(book_category))
    }

    pub async fn find_one(&self, filter: &BookCategoryFilter) -> Result<Option<BookCategoryDto>> {
        let conn = self.uow.connection().await?;
        let book_category = find(&*conn, filter).await?;
        Ok(book_category.map(|book_category| self.mapper.map_entity_to_dto(book_category)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<BookCategoryDto>> {
        self.find_one(&BookCategoryFilter {
            id: Some(id),
            ..BookCategoryFilter::default()
        })
        .await
    }

    /// `None` pagination returns every matching link.
    pub async fn find_many(
        &self,
        filter: &BookCategoryFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<BookCategoryDto>> {
        let conn = self.uow.connection().await?;
        let mut query = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt);
        if let Some(pagination) = pagination {
            query = query.offset(pagination.offset()).limit(pagination.limit);
        }
        let book_categories = query.all(&*conn).await?;
        Ok(book_categories
            .into_iter()
            .map(|book_category| self.mapper.map_entity_to_dto(book_category))
            .collect())
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("bookCategory", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(
    conn: &C,
    filter: &BookCategoryFilter,
) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
