use crate::common::{ApiResponse, ErrorCode};
use crate::error::ShelfwiseError;
use crate::exception::ExceptionFilter;
use axum::response::{IntoResponse, Response};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Maps every [`ShelfwiseError`] onto an error code and a short message.
///
/// Client-facing conditions keep their message. Registry, transaction and
/// database failures collapse into a generic 500 and are only logged.
#[derive(Default)]
pub struct HttpExceptionFilter;

impl HttpExceptionFilter {
    pub fn code_of(error: &ShelfwiseError) -> ErrorCode {
        match error {
            ShelfwiseError::Validation(_) => ErrorCode::BadRequest,
            ShelfwiseError::Unauthorized(_) | ShelfwiseError::InvalidCredentials => {
                ErrorCode::Unauthorized
            }
            ShelfwiseError::Forbidden(_) => ErrorCode::Forbidden,
            ShelfwiseError::NotFound { .. } => ErrorCode::NotFound,
            ShelfwiseError::AlreadyExists { .. } => ErrorCode::UnprocessableEntity,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: ShelfwiseError) -> Response {
        let code = Self::code_of(&error);

        let message = if code == ErrorCode::InternalServerError {
            tracing::error!(error = %error, "Request failed with an internal error");
            INTERNAL_MESSAGE.to_string()
        } else {
            tracing::debug!(error = %error, code = %code, "Request rejected");
            error.to_string()
        };

        ApiResponse::<()>::error(code, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::Violation;
    use axum::http::StatusCode;

    #[test]
    fn maps_domain_conditions_to_client_statuses() {
        let cases = [
            (
                ShelfwiseError::Validation(vec![Violation::new("email", "is required")]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShelfwiseError::Unauthorized("missing header".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (ShelfwiseError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ShelfwiseError::Forbidden("other user".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ShelfwiseError::not_found("book", "id=1"),
                StatusCode::NOT_FOUND,
            ),
            (
                ShelfwiseError::already_exists("user", "email=a@b.c"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (error, expected) in cases {
            let status: StatusCode = HttpExceptionFilter::code_of(&error).into();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn hides_internal_failures() {
        let error = ShelfwiseError::DependencyNotFound {
            key: "bookService".into(),
        };
        let response = HttpExceptionFilter.catch(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
