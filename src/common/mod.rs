mod pagination;
mod response;

pub use pagination::{MAX_PAGE, MAX_PAGE_LIMIT, Pagination};
pub use response::{ApiError, ApiResponse, ErrorCode};
