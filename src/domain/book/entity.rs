use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookLanguage {
    #[sea_orm(string_value = "english")]
    English,
    #[sea_orm(string_value = "polish")]
    Polish,
    #[sea_orm(string_value = "german")]
    German,
    #[sea_orm(string_value = "french")]
    French,
    #[sea_orm(string_value = "spanish")]
    Spanish,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookFormat {
    #[sea_orm(string_value = "hardcover")]
    Hardcover,
    #[sea_orm(string_value = "paperback")]
    Paperback,
    #[sea_orm(string_value = "kindle")]
    Kindle,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub title: String,
    pub release_year: i32,
    pub language: BookLanguage,
    pub format: BookFormat,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
