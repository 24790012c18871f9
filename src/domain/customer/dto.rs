use crate::domain::EntityMapper;
use crate::domain::customer::entity;
use crate::pipe::{Validate, Violation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerDto {
    pub user_id: Uuid,
}

impl Validate for CreateCustomerDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        if self.user_id.is_nil() {
            return Err(vec![Violation::new("userId", "must not be nil")]);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindCustomersQuery {
    pub user_id: Option<Uuid>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default)]
pub struct CustomerMapper;

impl EntityMapper<entity::Model, CustomerDto> for CustomerMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> CustomerDto {
        CustomerDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            user_id: entity.user_id,
        }
    }
}
