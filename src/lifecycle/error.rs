use crate::error::ShelfwiseError;
use std::time::Duration;
use thiserror::Error;

/// Failures while starting, serving, or stopping an [`Application`](super::Application).
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Application is missing its {0}")]
    Incomplete(&'static str),

    #[error("Startup hook `{hook}` failed: {source}")]
    HookFailed {
        hook: String,
        #[source]
        source: ShelfwiseError,
    },

    #[error("Startup hooks did not finish within {0:?}")]
    InitTimedOut(Duration),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
