use axum::{
    Json,
    http::StatusCode as HttpStatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use strum_macros::Display;

/// Error codes exposed to API clients.
///
/// The `code` field of an error body is the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    UnprocessableEntity,
    InternalServerError,
}

impl From<ErrorCode> for HttpStatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::BadRequest => HttpStatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => HttpStatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => HttpStatusCode::FORBIDDEN,
            ErrorCode::NotFound => HttpStatusCode::NOT_FOUND,
            ErrorCode::UnprocessableEntity => HttpStatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalServerError => HttpStatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard API response wrapper
///
/// Every JSON body the controllers return goes through this type, so
/// clients always see `{ "success": bool, "data"?: ..., "error"?: ... }`.
///
/// # Example
/// ```
/// use shelfwise::common::{ApiResponse, ErrorCode};
///
/// let found = ApiResponse::ok("book");
/// assert!(found.success);
///
/// let missing: ApiResponse<()> = ApiResponse::error(ErrorCode::NotFound, "Book not found");
/// assert!(!missing.success);
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    pub success: bool,

    #[serde(skip)]
    pub http_status: HttpStatusCode,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response with HTTP 200 OK.
    pub fn ok(data: T) -> Self {
        Self::with_status(HttpStatusCode::OK, data)
    }

    /// Successful response with HTTP 201 Created.
    pub fn created(data: T) -> Self {
        Self::with_status(HttpStatusCode::CREATED, data)
    }

    fn with_status(http_status: HttpStatusCode, data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            success: true,
            http_status,
        }
    }

    /// Error response; the `code` is the [`ErrorCode`] variant name.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.into(),
            }),
            success: false,
            http_status: code.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}
