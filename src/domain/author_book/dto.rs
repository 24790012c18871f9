use crate::domain::EntityMapper;
use crate::domain::author_book::entity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBookDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub book_id: Uuid,
}

#[derive(Debug, Default)]
pub struct AuthorBookMapper;

impl EntityMapper<entity::Model, AuthorBookDto> for AuthorBookMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> AuthorBookDto {
        AuthorBookDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            author_id: entity.author_id,
            book_id: entity.book_id,
        }
    }
}
