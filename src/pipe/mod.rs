//! Request input pipes.
//!
//! Pipes sit at the HTTP boundary and turn raw input (path segments, JSON
//! bodies, query strings) into typed values. Validation is an explicit
//! function per input shape ([`Validate`]) returning the full list of
//! violations instead of failing on the first one.

use crate::error::ShelfwiseError;
use serde::Serialize;
use std::fmt;

pub mod builtins;

pub use builtins::{ParseUuidPipe, ValidationPipe};

pub type PipeResult<T> = Result<T, PipeError>;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error("Validation failed")]
    Validation(Vec<Violation>),
}

impl From<PipeError> for ShelfwiseError {
    fn from(error: PipeError) -> Self {
        match error {
            PipeError::Validation(violations) => ShelfwiseError::Validation(violations),
        }
    }
}

/// The Pipe trait for transformation and validation
pub trait Pipe: Send + Sync + 'static {
    type Input;
    type Output;

    fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn into_result(violations: Vec<Violation>) -> Result<(), Vec<Violation>> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Explicit validator for one input shape.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<Violation>>;
}

pub fn require_non_empty(field: &str, value: &str, violations: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "must not be empty"));
    }
}

pub fn require_optional_non_empty(
    field: &str,
    value: Option<&str>,
    violations: &mut Vec<Violation>,
) {
    if let Some(value) = value {
        require_non_empty(field, value, violations);
    }
}

pub fn require_email(field: &str, value: &str, violations: &mut Vec<Violation>) {
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        });
    if !valid {
        violations.push(Violation::new(field, "must be a valid email address"));
    }
}

pub fn require_min_length(field: &str, value: &str, min: usize, violations: &mut Vec<Violation>) {
    if value.chars().count() < min {
        violations.push(Violation::new(
            field,
            format!("must be at least {min} characters long"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule() {
        let mut violations = Vec::new();
        require_email("email", "reader@example.com", &mut violations);
        assert!(violations.is_empty());

        for invalid in ["", "reader", "@example.com", "reader@example", "reader@.com"] {
            let mut violations = Vec::new();
            require_email("email", invalid, &mut violations);
            assert_eq!(violations.len(), 1, "{invalid} should be rejected");
        }
    }

    #[test]
    fn violations_render_field_first() {
        let violation = Violation::new("title", "must not be empty");
        assert_eq!(violation.to_string(), "title must not be empty");
    }
}
