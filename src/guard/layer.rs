use crate::error::ShelfwiseError;
use crate::guard::Guard;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer for Guards
///
/// Guards run in the order they were added; the first rejection short-cuts
/// the request with the matching error response.
///
/// ```rust,ignore
/// let router = Router::new()
///     .route("/books", post(create_book))
///     .route_layer(GuardLayer::new(BearerAuthGuard::new(token_service)));
/// ```
#[derive(Clone)]
pub struct GuardLayer {
    guards: Arc<Vec<Arc<dyn Guard>>>,
}

impl GuardLayer {
    pub fn new(guard: impl Guard) -> Self {
        Self {
            guards: Arc::new(vec![Arc::new(guard)]),
        }
    }

    pub fn from_guards(guards: Vec<Arc<dyn Guard>>) -> Self {
        Self {
            guards: Arc::new(guards),
        }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            guards: Arc::clone(&self.guards),
        }
    }
}

#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    guards: Arc<Vec<Arc<dyn Guard>>>,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let guards = Arc::clone(&self.guards);
        // The clone is not ready; keep the one poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            for guard in guards.iter() {
                if let Err(e) = guard.can_activate(&mut req).await {
                    tracing::debug!(error = %e, path = %req.uri().path(), "Guard rejected request");
                    return Ok(ShelfwiseError::from(e).into_response());
                }
            }
            inner.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{GuardError, GuardResult};
    use async_trait::async_trait;
    use axum::{Router, http::StatusCode, routing::get};
    use tower::ServiceExt;

    struct HeaderGuard;

    #[async_trait]
    impl Guard for HeaderGuard {
        async fn can_activate(&self, request: &mut Request<Body>) -> GuardResult {
            if request.headers().contains_key("x-allow") {
                Ok(())
            } else {
                Err(GuardError::Forbidden("header missing".into()))
            }
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .route_layer(GuardLayer::new(HeaderGuard))
    }

    #[tokio::test]
    async fn rejected_requests_get_the_guard_status() {
        let response = app()
            .oneshot(Request::get("/guarded").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn allowed_requests_reach_the_handler() {
        let response = app()
            .oneshot(
                Request::get("/guarded")
                    .header("x-allow", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
