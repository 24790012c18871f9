use crate::domain::EntityMapper;
use crate::domain::author::entity;
use crate::pipe::{Validate, Violation, require_non_empty, require_optional_non_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub about: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorDto {
    pub first_name: String,
    pub last_name: String,
    pub about: Option<String>,
}

impl Validate for CreateAuthorDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_non_empty("firstName", &self.first_name, &mut violations);
        require_non_empty("lastName", &self.last_name, &mut violations);
        require_optional_non_empty("about", self.about.as_deref(), &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorDto {
    pub about: Option<String>,
}

impl Validate for UpdateAuthorDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        match self.about.as_deref() {
            Some(about) => require_non_empty("about", about, &mut violations),
            None => violations.push(Violation::new("about", "must be provided")),
        }
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAuthorsQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default)]
pub struct AuthorMapper;

impl EntityMapper<entity::Model, AuthorDto> for AuthorMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> AuthorDto {
        AuthorDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            first_name: entity.first_name,
            last_name: entity.last_name,
            about: entity.about,
        }
    }
}
