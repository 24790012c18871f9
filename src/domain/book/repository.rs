use crate::common::Pagination;
use crate::domain::EntityMapper;
use crate::domain::book::dto::{BookDto, BookMapper, UpdateBookDto};
use crate::domain::book::entity::{self, BookFormat, BookLanguage};
use crate::error::{Result, ShelfwiseError};
use crate::transactional::UnitOfWork;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct CreateBookData {
    pub title: String,
    pub release_year: i32,
    pub language: BookLanguage,
    pub format: BookFormat,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub id: Option<Uuid>,
    pub ids: Option<Vec<Uuid>>,
    /// Exact title match.
    pub title: Option<String>,
    /// Substring match on the title.
    pub title_contains: Option<String>,
    pub release_year: Option<i32>,
    pub language: Option<BookLanguage>,
    pub format: Option<BookFormat>,
}

impl BookFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
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
        if let Some(title) = &self.title {
            condition = condition.add(entity::Column::Title.eq(title.as_str()));
        }
        if let Some(fragment) = &self.title_contains {
            condition = condition.add(entity::Column::Title.contains(fragment));
        }
        if let Some(release_year) = self.release_year {
            condition = condition.add(entity::Column::ReleaseYear.eq(release_year));
        }
        if let Some(language) = self.language {
            condition = condition.add(entity::Column::Language.eq(language));
        }
        if let Some(format) = self.format {
            condition = condition.add(entity::Column::Format.eq(format));
        }
        condition
    }
}

pub struct BookRepositoryFactory {
    mapper: Arc<BookMapper>,
}

impl BookRepositoryFactory {
    pub fn new(mapper: Arc<BookMapper>) -> Self {
        Self { mapper }
    }

    pub fn create(&self, uow: &UnitOfWork) -> BookRepository {
        BookRepository {
            uow: uow.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

pub struct BookRepository {
    uow: UnitOfWork,
    mapper: Arc<BookMapper>,
}

impl BookRepository {
    pub async fn create_one(&self, data: CreateBookData) -> Result<BookDto> {
        let conn = self.uow.connection().await?;

        if find(&*conn, &BookFilter::by_title(&data.title)).await?.is_some() {
            return Err(ShelfwiseError::already_exists(
                "book",
                format!("title={}", data.title),
            ));
        }

        let now = Utc::now();
        let book = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            title: Set(data.title),
            release_year: Set(data.release_year),
            language: Set(data.language),
            format: Set(data.format),
            description: Set(data.description),
            price: Set(data.price),
        }
        .insert(&*conn)
        .await?;

        Ok(self.mapper.map_entity_to_dto(book))
    }

    pub async fn find_one(&self, filter: &BookFilter) -> Result<Option<BookDto>> {
        let conn = self.uow.connection().await?;
        let book = find(&*conn, filter).await?;
        Ok(book.map(|book| self.mapper.map_entity_to_dto(book)))
    }

    pub async fn find_one_by_id(&self, id: Uuid) -> Result<Option<BookDto>> {
        self.find_one(&BookFilter {
            id: Some(id),
            ..BookFilter::default()
        })
        .await
    }

    pub async fn find_many(&self, filter: &BookFilter, pagination: Pagination) -> Result<Vec<BookDto>> {
        let conn = self.uow.connection().await?;
        let books = entity::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entity::Column::CreatedAt)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&*conn)
            .await?;
        Ok(books
            .into_iter()
            .map(|book| self.mapper.map_entity_to_dto(book))
            .collect())
    }

    /// Renaming a book onto another book's title is `AlreadyExists`.
    pub async fn update_one(&self, id: Uuid, data: UpdateBookDto) -> Result<BookDto> {
        let conn = self.uow.connection().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&*conn)
            .await?
            .ok_or_else(|| ShelfwiseError::not_found("book", format!("id={id}")))?;

        if let Some(title) = data.title.as_deref().filter(|title| *title != existing.title) {
            if find(&*conn, &BookFilter::by_title(title)).await?.is_some() {
                return Err(ShelfwiseError::already_exists("book", format!("title={title}")));
            }
        }

        let mut book: entity::ActiveModel = existing.into();
        if let Some(title) = data.title {
            book.title = Set(title);
        }
        if let Some(release_year) = data.release_year {
            book.release_year = Set(release_year);
        }
        if let Some(language) = data.language {
            book.language = Set(language);
        }
        if let Some(format) = data.format {
            book.format = Set(format);
        }
        if let Some(description) = data.description {
            book.description = Set(Some(description));
        }
        if let Some(price) = data.price {
            book.price = Set(price);
        }
        book.updated_at = Set(Utc::now());
        let book = book.update(&*conn).await?;

        Ok(self.mapper.map_entity_to_dto(book))
    }

    pub async fn remove_one(&self, id: Uuid) -> Result<()> {
        let conn = self.uow.connection().await?;

        if entity::Entity::find_by_id(id).one(&*conn).await?.is_none() {
            return Err(ShelfwiseError::not_found("book", format!("id={id}")));
        }
        entity::Entity::delete_by_id(id).exec(&*conn).await?;
        Ok(())
    }
}

async fn find<C: ConnectionTrait>(conn: &C, filter: &BookFilter) -> Result<Option<entity::Model>> {
    Ok(entity::Entity::find()
        .filter(filter.condition())
        .one(conn)
        .await?)
}
