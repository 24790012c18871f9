use crate::error::ShelfwiseError;
use axum::response::Response;

pub mod http;

/// The ExceptionFilter trait
///
/// Filters turn a classified error into the response a client sees.
/// They must return a valid Response and never leak internal details.
pub trait ExceptionFilter: Send + Sync + 'static {
    fn catch(&self, error: ShelfwiseError) -> Response;
}
