use super::{LifecycleError, OnModuleDestroy, OnModuleInit, Result};
use std::sync::Arc;
use std::time::Duration;

struct Named<T: ?Sized> {
    name: String,
    hook: Arc<T>,
}

/// Ordered startup and shutdown hooks.
///
/// Startup runs in registration order and stops at the first failure, so a
/// database that cannot be reached keeps the server from listening.
/// Shutdown runs in reverse and never stops early: a pool that fails to
/// close must not keep the services registered before it from cleaning up.
///
/// ```rust,ignore
/// let mut manager = LifecycleManager::new();
/// manager.register_init(database.clone(), "database");
/// manager.register_destroy(database, "database");
/// ```
#[derive(Default)]
pub struct LifecycleManager {
    init: Vec<Named<dyn OnModuleInit>>,
    destroy: Vec<Named<dyn OnModuleDestroy>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_init(&mut self, hook: Arc<dyn OnModuleInit>, name: impl Into<String>) {
        self.init.push(Named {
            name: name.into(),
            hook,
        });
    }

    pub fn register_destroy(&mut self, hook: Arc<dyn OnModuleDestroy>, name: impl Into<String>) {
        self.destroy.push(Named {
            name: name.into(),
            hook,
        });
    }

    pub async fn call_module_init(&self) -> Result<()> {
        for Named { name, hook } in &self.init {
            tracing::debug!(hook = %name, "Running startup hook");
            if let Err(source) = hook.on_module_init().await {
                tracing::error!(hook = %name, error = %source, "Startup hook failed");
                return Err(LifecycleError::HookFailed {
                    hook: name.clone(),
                    source,
                });
            }
        }
        tracing::info!(hooks = self.init.len(), "Startup hooks complete");
        Ok(())
    }

    pub async fn call_module_init_with_timeout(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.call_module_init())
            .await
            .map_err(|_| LifecycleError::InitTimedOut(timeout))?
    }

    pub async fn call_module_destroy(&self) {
        for Named { name, hook } in self.destroy.iter().rev() {
            tracing::debug!(hook = %name, "Running shutdown hook");
            if let Err(e) = hook.on_module_destroy().await {
                tracing::error!(hook = %name, error = %e, "Shutdown hook failed");
            }
        }
        tracing::info!(hooks = self.destroy.len(), "Shutdown hooks complete");
    }

    pub fn init_hook_count(&self) -> usize {
        self.init.len()
    }

    pub fn destroy_hook_count(&self) -> usize {
        self.destroy.len()
    }
}
