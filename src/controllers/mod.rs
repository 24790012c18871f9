//! HTTP controllers.
//!
//! One controller per domain area. A controller holds the transaction
//! runner and its service, and exposes `router`, which mounts its routes
//! with the bearer guard on every route that needs a caller identity. Each
//! request runs in exactly one unit of work.

mod address;
mod author;
mod author_book;
mod book;
mod book_category;
mod category;
mod customer;
mod extract;
mod user;

pub use address::AddressController;
pub use author::AuthorController;
pub use author_book::AuthorBookController;
pub use book::BookController;
pub use book_category::BookCategoryController;
pub use category::CategoryController;
pub use customer::CustomerController;
pub use user::UserController;

use crate::common::Pagination;
use crate::database::TRANSACTION_RUNNER;
use crate::di::{Key, Registry};
use crate::domain::address::ADDRESS_SERVICE;
use crate::domain::author::AUTHOR_SERVICE;
use crate::domain::author_book::AUTHOR_BOOK_SERVICE;
use crate::domain::book::BOOK_SERVICE;
use crate::domain::book_category::BOOK_CATEGORY_SERVICE;
use crate::domain::category::CATEGORY_SERVICE;
use crate::domain::customer::CUSTOMER_SERVICE;
use crate::domain::user::{TOKEN_SERVICE, USER_SERVICE};
use crate::error::{Result, ShelfwiseError};
use crate::guard::{BearerAuthGuard, Guard, GuardLayer};
use crate::module::Module;
use crate::pipe::{ParseUuidPipe, Pipe, Validate, ValidationPipe};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

pub const AUTH_GUARD: Key<dyn Guard> = Key::new("authGuard");
pub const USER_CONTROLLER: Key<UserController> = Key::new("userController");
pub const CUSTOMER_CONTROLLER: Key<CustomerController> = Key::new("customerController");
pub const ADDRESS_CONTROLLER: Key<AddressController> = Key::new("addressController");
pub const AUTHOR_CONTROLLER: Key<AuthorController> = Key::new("authorController");
pub const BOOK_CONTROLLER: Key<BookController> = Key::new("bookController");
pub const CATEGORY_CONTROLLER: Key<CategoryController> = Key::new("categoryController");
pub const AUTHOR_BOOK_CONTROLLER: Key<AuthorBookController> = Key::new("authorBookController");
pub const BOOK_CATEGORY_CONTROLLER: Key<BookCategoryController> =
    Key::new("bookCategoryController");

/// Registers the auth guard and every controller.
///
/// Controllers are scoped: a scope that overrides `TRANSACTION_RUNNER` gets
/// controllers that run on the overriding runner.
pub struct ControllersModule;

#[async_trait]
impl Module for ControllersModule {
    fn name(&self) -> &'static str {
        "controllers"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        registry.register([
            AUTH_GUARD.singleton(|r| {
                Ok(Arc::new(BearerAuthGuard::new(r.resolve(&TOKEN_SERVICE)?)) as Arc<dyn Guard>)
            }),
            USER_CONTROLLER.scoped(|r| {
                Ok(UserController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&USER_SERVICE)?,
                ))
            }),
            CUSTOMER_CONTROLLER.scoped(|r| {
                Ok(CustomerController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&CUSTOMER_SERVICE)?,
                ))
            }),
            ADDRESS_CONTROLLER.scoped(|r| {
                Ok(AddressController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&ADDRESS_SERVICE)?,
                ))
            }),
            AUTHOR_CONTROLLER.scoped(|r| {
                Ok(AuthorController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&AUTHOR_SERVICE)?,
                ))
            }),
            BOOK_CONTROLLER.scoped(|r| {
                Ok(BookController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&BOOK_SERVICE)?,
                ))
            }),
            CATEGORY_CONTROLLER.scoped(|r| {
                Ok(CategoryController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&CATEGORY_SERVICE)?,
                ))
            }),
            AUTHOR_BOOK_CONTROLLER.scoped(|r| {
                Ok(AuthorBookController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&AUTHOR_BOOK_SERVICE)?,
                ))
            }),
            BOOK_CATEGORY_CONTROLLER.scoped(|r| {
                Ok(BookCategoryController::new(
                    r.resolve(&TRANSACTION_RUNNER)?,
                    r.resolve(&BOOK_CATEGORY_SERVICE)?,
                ))
            }),
        ]);
        Ok(())
    }
}

/// Mounts every controller resolved from `registry` on one router.
pub fn routes(registry: &Registry) -> Result<axum::Router> {
    let guard = GuardLayer::from_guards(vec![registry.resolve(&AUTH_GUARD)?]);

    Ok(axum::Router::new()
        .merge(registry.resolve(&USER_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&CUSTOMER_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&ADDRESS_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&AUTHOR_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&BOOK_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&CATEGORY_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&AUTHOR_BOOK_CONTROLLER)?.router(guard.clone()))
        .merge(registry.resolve(&BOOK_CATEGORY_CONTROLLER)?.router(guard)))
}

fn parse_id(field: &'static str, raw: String) -> Result<Uuid> {
    Ok(ParseUuidPipe::new(field).transform(raw)?)
}

fn parse_body<T>(body: serde_json::Value) -> Result<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    Ok(ValidationPipe::<T>::new().transform(body)?)
}

fn pagination(page: Option<u64>, limit: Option<u64>) -> Result<Pagination> {
    let pagination = Pagination::from_parts(page, limit);
    pagination.validate().map_err(ShelfwiseError::Validation)?;
    Ok(pagination)
}
