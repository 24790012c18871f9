//! Composition root.

use crate::config::{AppConfig, ConfigModule};
use crate::controllers::{self, ControllersModule};
use crate::database::DbModule;
use crate::di::Registry;
use crate::domain::address::AddressModule;
use crate::domain::author::AuthorModule;
use crate::domain::author_book::AuthorBookModule;
use crate::domain::book::BookModule;
use crate::domain::book_category::BookCategoryModule;
use crate::domain::category::CategoryModule;
use crate::domain::customer::CustomerModule;
use crate::domain::user::UserModule;
use crate::error::Result;
use crate::module::Module;
use axum::Router;
use tower_http::trace::TraceLayer;

/// The production module list, connecting to `config.database`.
pub fn default_modules(config: &AppConfig) -> Vec<Box<dyn Module>> {
    modules_with(config, DbModule::new(config.database.clone()))
}

/// The production module list around a caller-supplied [`DbModule`].
pub fn modules_with(config: &AppConfig, db: DbModule) -> Vec<Box<dyn Module>> {
    vec![
        Box::new(ConfigModule::new(config.clone())),
        Box::new(db),
        Box::new(UserModule),
        Box::new(CustomerModule),
        Box::new(AddressModule),
        Box::new(AuthorModule),
        Box::new(BookModule),
        Box::new(CategoryModule),
        Box::new(AuthorBookModule),
        Box::new(BookCategoryModule),
        Box::new(ControllersModule),
    ]
}

/// HTTP router for the controllers visible from `registry`, with request
/// tracing.
pub fn build_router(registry: &Registry) -> Result<Router> {
    Ok(controllers::routes(registry)?.layer(TraceLayer::new_for_http()))
}
