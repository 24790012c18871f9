//! Unique fixture values. Every call yields data that does not collide
//! with earlier calls, so tests can share a database without clashing on
//! unique columns.

use serde_json::{Value, json};
use shelfwise::domain::address::dto::CreateAddressDto;
use shelfwise::domain::author::dto::CreateAuthorDto;
use shelfwise::domain::book::dto::CreateBookDto;
use shelfwise::domain::book::entity::{BookFormat, BookLanguage};
use shelfwise::domain::user::service::RegisterUserData;
use uuid::Uuid;

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn unique_email() -> String {
    format!("reader-{}@shelfwise.test", suffix())
}

pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", suffix())
}

pub fn unique_title() -> String {
    unique_name("Title")
}

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn register_user_data() -> RegisterUserData {
    RegisterUserData {
        email: unique_email(),
        password: TEST_PASSWORD.to_string(),
    }
}

pub fn create_author_dto() -> CreateAuthorDto {
    CreateAuthorDto {
        first_name: unique_name("First"),
        last_name: unique_name("Last"),
        about: None,
    }
}

pub fn create_book_dto(author_ids: Vec<Uuid>) -> CreateBookDto {
    CreateBookDto {
        title: unique_title(),
        release_year: 2001,
        language: BookLanguage::English,
        format: BookFormat::Paperback,
        description: None,
        price: 19.99,
        author_ids,
    }
}

pub fn create_address_dto(customer_id: Uuid) -> CreateAddressDto {
    CreateAddressDto {
        full_name: unique_name("Reader"),
        phone_number: "+48123456789".to_string(),
        country: "Poland".to_string(),
        state: "Mazovia".to_string(),
        city: "Warsaw".to_string(),
        zip_code: "00-001".to_string(),
        street_address: "Marszalkowska 1".to_string(),
        delivery_instructions: None,
        customer_id,
    }
}

/// JSON body for `POST /books`.
pub fn book_body(author_ids: &[Uuid]) -> Value {
    json!({
        "title": unique_title(),
        "releaseYear": 2001,
        "language": "english",
        "format": "paperback",
        "price": 19.99,
        "authorIds": author_ids,
    })
}
