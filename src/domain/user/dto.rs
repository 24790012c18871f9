use crate::domain::EntityMapper;
use crate::domain::user::entity::{self, UserRole};
use crate::pipe::{Validate, Violation, require_email, require_min_length};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    /// Password hash, never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    pub email: String,
    pub password: String,
}

impl Validate for RegisterUserDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_email("email", &self.email, &mut violations);
        require_min_length("password", &self.password, MIN_PASSWORD_LENGTH, &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDto {
    pub email: String,
    pub password: String,
}

impl Validate for LoginUserDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_email("email", &self.email, &mut violations);
        require_min_length("password", &self.password, 1, &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordDto {
    pub user_id: Uuid,
    pub password: String,
}

impl Validate for SetPasswordDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_min_length("password", &self.password, MIN_PASSWORD_LENGTH, &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenDto {
    pub access_token: String,
}

#[derive(Debug, Default)]
pub struct UserMapper;

impl EntityMapper<entity::Model, UserDto> for UserMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> UserDto {
        UserDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            email: entity.email,
            password: entity.password,
            role: entity.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_keeps_fields_and_hides_password() {
        let now = Utc::now();
        let model = entity::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: "reader@example.com".into(),
            password: "hash".into(),
            role: UserRole::User,
        };

        let dto = UserMapper.map_entity_to_dto(model.clone());
        assert_eq!(dto.id, model.id);
        assert_eq!(dto.email, model.email);

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "user");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_register_validation() {
        let dto = RegisterUserDto {
            email: "not-an-email".into(),
            password: "short".into(),
        };
        let violations = dto.validate().unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
