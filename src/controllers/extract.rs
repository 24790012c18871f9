use crate::error::ShelfwiseError;
use crate::pipe::Violation;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw JSON request body. Rejections become a `body` violation, so a
/// malformed body gets the same 400 envelope as a failed validation.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ShelfwiseError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_violation(&rejection)),
        }
    }
}

fn body_violation(rejection: &JsonRejection) -> ShelfwiseError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
        _ => "must be valid JSON",
    };
    ShelfwiseError::Validation(vec![Violation::new("body", message)])
}

/// Query string parameters. Unparsable values become a `query` violation.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ShelfwiseError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                ShelfwiseError::Validation(vec![Violation::new("query", rejection.body_text())])
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    fn post(body: &'static str, content_type: Option<&str>) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let err = JsonBody::from_request(post("{not json", Some("application/json")), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::Validation(ref v) if v[0].field == "body"));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_validation_error() {
        let err = JsonBody::from_request(post("{}", None), &()).await.unwrap_err();
        assert!(err.to_string().contains("Content-Type"));
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let request = post(r#"{"a":1}"#, Some("application/json"));
        let JsonBody(value) = JsonBody::from_request(request, &()).await.unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn bad_query_value_is_a_validation_error() {
        #[derive(Debug, serde::Deserialize)]
        struct Page {
            #[allow(dead_code)]
            page: Option<u64>,
        }

        let request = Request::builder().uri("/?page=abc").body(Body::empty()).unwrap();
        let (mut parts, _) = request.into_parts();
        let err = QueryParams::<Page>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ShelfwiseError::Validation(ref v) if v[0].field == "query"));
    }
}
