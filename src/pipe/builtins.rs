use crate::pipe::{Pipe, PipeError, PipeResult, Validate, Violation};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use uuid::Uuid;

/// Parses a path segment into a UUID.
pub struct ParseUuidPipe {
    field: &'static str,
}

impl ParseUuidPipe {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Pipe for ParseUuidPipe {
    type Input = String;
    type Output = Uuid;

    fn transform(&self, input: String) -> PipeResult<Uuid> {
        Uuid::parse_str(&input).map_err(|_| {
            PipeError::Validation(vec![Violation::new(self.field, "must be a valid UUID")])
        })
    }
}

/// Deserializes a JSON value into `T` and runs its validator.
///
/// Missing or mistyped fields are reported as violations, the same way
/// rule failures are, so the client always gets a 400.
pub struct ValidationPipe<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> ValidationPipe<T> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for ValidationPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pipe for ValidationPipe<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Input = serde_json::Value;
    type Output = T;

    fn transform(&self, input: serde_json::Value) -> PipeResult<T> {
        let value: T = serde_json::from_value(input)
            .map_err(|e| PipeError::Validation(vec![Violation::new("body", e.to_string())]))?;
        value.validate().map_err(PipeError::Validation)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Login {
        email: String,
    }

    impl Validate for Login {
        fn validate(&self) -> Result<(), Vec<Violation>> {
            let mut violations = Vec::new();
            crate::pipe::require_email("email", &self.email, &mut violations);
            Violation::into_result(violations)
        }
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        let pipe = ParseUuidPipe::new("id");
        assert!(pipe.transform("abc".to_string()).is_err());

        let id = Uuid::new_v4();
        assert_eq!(pipe.transform(id.to_string()).unwrap(), id);
    }

    #[test]
    fn validation_pipe_reports_missing_fields() {
        let pipe = ValidationPipe::<Login>::new();
        let PipeError::Validation(violations) = pipe.transform(json!({})).unwrap_err();
        assert_eq!(violations[0].field, "body");
    }

    #[test]
    fn validation_pipe_runs_rules() {
        let pipe = ValidationPipe::<Login>::new();
        assert!(pipe.transform(json!({ "email": "nope" })).is_err());
        assert!(pipe.transform(json!({ "email": "a@b.io" })).is_ok());
    }
}
