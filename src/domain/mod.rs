//! Bookstore domain areas.
//!
//! Every area follows the same layering: a sea-orm entity, a serializable
//! DTO plus the mapper that produces it, a repository factory that binds a
//! repository to one [`UnitOfWork`](crate::transactional::UnitOfWork), a
//! service, and the [`Module`](crate::module::Module) that registers them.

pub mod address;
pub mod author;
pub mod author_book;
pub mod book;
pub mod book_category;
pub mod category;
pub mod customer;
pub mod user;

/// Converts a persisted record into the representation handed to callers.
pub trait EntityMapper<E, D>: Send + Sync {
    fn map_entity_to_dto(&self, entity: E) -> D;
}
