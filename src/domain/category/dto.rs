use crate::domain::EntityMapper;
use crate::domain::category::entity;
use crate::pipe::{Validate, Violation, require_non_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

/// Body of both create and update requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNameDto {
    pub name: String,
}

impl Validate for CategoryNameDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_non_empty("name", &self.name, &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindCategoriesQuery {
    pub name: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default)]
pub struct CategoryMapper;

impl EntityMapper<entity::Model, CategoryDto> for CategoryMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> CategoryDto {
        CategoryDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            name: entity.name,
        }
    }
}
