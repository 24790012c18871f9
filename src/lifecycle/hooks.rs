use crate::error::Result;
use async_trait::async_trait;

/// Called after the registry is built and before the server accepts requests.
///
/// Hooks take `&self` because the services live behind `Arc`s shared with
/// the registry; anything a hook changes must use interior mutability.
#[async_trait]
pub trait OnModuleInit: Send + Sync {
    async fn on_module_init(&self) -> Result<()>;
}

/// Called during shutdown, after the server stopped accepting requests.
#[async_trait]
pub trait OnModuleDestroy: Send + Sync {
    async fn on_module_destroy(&self) -> Result<()>;
}
