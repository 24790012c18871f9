use crate::domain::EntityMapper;
use crate::domain::book::entity::{self, BookFormat, BookLanguage};
use crate::pipe::{Validate, Violation, require_non_empty, require_optional_non_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RELEASE_YEAR: i32 = 1800;
pub const MAX_RELEASE_YEAR: i32 = 2500;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub release_year: i32,
    pub language: BookLanguage,
    pub format: BookFormat,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookDto {
    pub title: String,
    pub release_year: i32,
    pub language: BookLanguage,
    pub format: BookFormat,
    pub description: Option<String>,
    pub price: f64,
    /// Authors linked to the new book in the same unit of work.
    #[serde(default)]
    pub author_ids: Vec<Uuid>,
}

fn check_release_year(year: i32, violations: &mut Vec<Violation>) {
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
        violations.push(Violation::new(
            "releaseYear",
            format!("must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"),
        ));
    }
}

fn check_price(price: f64, violations: &mut Vec<Violation>) {
    if !price.is_finite() || price <= 0.0 {
        violations.push(Violation::new("price", "must be a positive number"));
    }
}

impl Validate for CreateBookDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_non_empty("title", &self.title, &mut violations);
        check_release_year(self.release_year, &mut violations);
        require_optional_non_empty("description", self.description.as_deref(), &mut violations);
        check_price(self.price, &mut violations);
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookDto {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub language: Option<BookLanguage>,
    pub format: Option<BookFormat>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl Validate for UpdateBookDto {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        require_optional_non_empty("title", self.title.as_deref(), &mut violations);
        if let Some(year) = self.release_year {
            check_release_year(year, &mut violations);
        }
        require_optional_non_empty("description", self.description.as_deref(), &mut violations);
        if let Some(price) = self.price {
            check_price(price, &mut violations);
        }
        Violation::into_result(violations)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindBooksQuery {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub language: Option<BookLanguage>,
    pub format: Option<BookFormat>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Default)]
pub struct BookMapper;

impl EntityMapper<entity::Model, BookDto> for BookMapper {
    fn map_entity_to_dto(&self, entity: entity::Model) -> BookDto {
        BookDto {
            id: entity.id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            title: entity.title,
            release_year: entity.release_year,
            language: entity.language,
            format: entity.format,
            description: entity.description,
            price: entity.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_book_validation_collects_every_violation() {
        let dto: CreateBookDto = serde_json::from_value(serde_json::json!({
            "title": " ",
            "releaseYear": 1200,
            "language": "polish",
            "format": "kindle",
            "price": -3.0
        }))
        .unwrap();

        let fields: Vec<String> = dto
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|violation| violation.field)
            .collect();
        assert_eq!(fields, vec!["title", "releaseYear", "price"]);
        assert!(dto.author_ids.is_empty());
    }

    #[test]
    fn test_unknown_language_is_rejected_by_serde() {
        let result = serde_json::from_value::<CreateBookDto>(serde_json::json!({
            "title": "Solaris",
            "releaseYear": 1961,
            "language": "klingon",
            "format": "paperback",
            "price": 10.0
        }));
        assert!(result.is_err());
    }
}
