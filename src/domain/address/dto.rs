use crate::domain::EntityMapper;
use crate::domain::address::entity;
use crate::pipe::{Validate, Violation, require_non_empty, require_optional_non_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub full_name: String,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub street_address: String,
    pub delivery_instructions: Option<String>,
    pub customer_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressDto {
    pub full_name: String,
    pub phone_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip_code: String,
    pub street_address: String,
    pub delivery_instructions: Option<String>,
    pub customer_id: Uuid,
}

impl Validate for CreateAddressDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_non_empty("fullName", &self.full_name, &mut violations);
        require_non_empty("phoneNumber", &self.phone_number, &mut violations);
        require_non_empty("country", &self.country, &mut violations);
        require_non_empty("state", &self.state, &mut violations);
        require_non_empty("city", &self.city, &mut violations);
        require_non_empty("zipCode", &self.zip_code, &mut violations);
        require_non_empty("streetAddress", &self.street_address, &mut violations);
        require_optional_non_empty(
            "deliveryInstructions",
            self.delivery_instructions.as_deref(),
            &mut violations,
        );
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressDto {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub street_address: Option<String>,
    pub delivery_instructions: Option<String>,
}

impl Validate for UpdateAddressDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for (field, value) in [
            ("fullName", &self.full_name),
            ("phoneNumber", &self.phone_number),
            ("country", &self.country),
            ("state", &self.state),
            ("city", &self.city),
            ("zipCode", &self.zip_code),
            ("streetAddress", &self.street_address),
            ("deliveryInstructions", &self.delivery_instructions),
        ] {
            require_optional_non_empty(field, value.as_deref(), &mut violations);
        }
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindAddressesQuery {
    pub customer_id: Option<Uuid>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default)]
pub struct AddressMapper;

impl EntityMapper<entity::Model, AddressDto> for AddressMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> AddressDto {
        AddressDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            full_name: entity.full_name,
            phone_number: entity.phone_number,
            country: entity.country,
            state: entity.state,
            city: entity.city,
            zip_code: entity.zip_code,
            street_address: entity.street_address,
            delivery_instructions: entity.delivery_instructions,
            customer_id: entity.customer_id,
        }
    }
}
