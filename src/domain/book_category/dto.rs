use crate::domain::EntityMapper;
use crate::domain::book_category::entity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCategoryDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub book_id: Uuid,
    pub category_id: Uuid,
}

#[derive(Debug, Default)]
pub struct BookCategoryMapper;

impl EntityMapper<entity::Model, BookCategoryDto> for BookCategoryMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> BookCategoryDto {
        BookCategoryDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            book_id: entity.book_id,
            category_id: entity.category_id,
        }
    }
}
