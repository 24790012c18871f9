use crate::exception::ExceptionFilter;
use crate::pipe::Violation;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShelfwiseError>;

#[derive(Debug, Error)]
pub enum ShelfwiseError {
    #[error("Dependency not found: {key}")]
    DependencyNotFound { key: String },

    #[error("Failed to downcast dependency: {key}")]
    DowncastFailed { key: String },

    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("Scope mismatch: {message}")]
    ScopeMismatch { message: String },

    #[error("Module registration failed for {module}: {message}")]
    ModuleRegistrationFailed { module: String, message: String },

    #[error("{entity} not found ({criteria})")]
    NotFound {
        entity: &'static str,
        criteria: String,
    },

    #[error("{entity} already exists ({criteria})")]
    AlreadyExists {
        entity: &'static str,
        criteria: String,
    },

    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Transaction is no longer open (state: {state})")]
    TransactionClosed { state: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShelfwiseError {
    pub fn not_found(entity: &'static str, criteria: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            criteria: criteria.into(),
        }
    }

    pub fn already_exists(entity: &'static str, criteria: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            criteria: criteria.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl axum::response::IntoResponse for ShelfwiseError {
    fn into_response(self) -> axum::response::Response {
        crate::exception::http::HttpExceptionFilter.catch(self)
    }
}
