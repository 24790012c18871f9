use super::{
    LifecycleError, LifecycleManager, OnModuleDestroy, OnModuleInit, Result, shutdown_signal,
};
use crate::di::Registry;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// A composed application ready to serve.
///
/// # Example
///
/// ```rust,ignore
/// use shelfwise::lifecycle::Application;
///
/// let app = Application::builder()
///     .registry(registry.clone())
///     .router(shelfwise::app::build_router(&registry)?)
///     .register_lifecycle(database, "database")
///     .build()
///     .await?;
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// app.serve(listener).await?;
/// ```
pub struct Application {
    registry: Registry,
    router: Router,
    lifecycle_manager: Arc<LifecycleManager>,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn lifecycle_manager(&self) -> &Arc<LifecycleManager> {
        &self.lifecycle_manager
    }

    /// Serves until SIGINT/SIGTERM, then runs the destroy hooks.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        self.serve_until(listener, shutdown_signal()).await
    }

    /// Serves until `signal` completes, then runs the destroy hooks.
    pub async fn serve_until<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        tracing::info!(%address, "Listening");

        let served = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(signal)
            .await;

        self.shutdown().await;
        served.map_err(LifecycleError::from)
    }

    /// Runs the destroy hooks. Failures are logged, not returned.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down");
        self.lifecycle_manager.call_module_destroy().await;
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    registry: Option<Registry>,
    router: Option<Router>,
    lifecycle_manager: LifecycleManager,
    init_timeout: Option<Duration>,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn init_timeout(mut self, timeout: Duration) -> Self {
        self.init_timeout = Some(timeout);
        self
    }

    pub fn on_init(mut self, service: Arc<dyn OnModuleInit>, name: impl Into<String>) -> Self {
        self.lifecycle_manager.register_init(service, name);
        self
    }

    pub fn on_destroy(mut self, service: Arc<dyn OnModuleDestroy>, name: impl Into<String>) -> Self {
        self.lifecycle_manager.register_destroy(service, name);
        self
    }

    /// Registers `service` for both init and destroy hooks.
    pub fn register_lifecycle<T>(self, service: Arc<T>, name: impl Into<String>) -> Self
    where
        T: OnModuleInit + OnModuleDestroy + 'static,
    {
        let name = name.into();
        self.on_init(service.clone(), name.clone())
            .on_destroy(service, name)
    }

    /// Runs every OnModuleInit hook and returns the application.
    ///
    /// # Errors
    ///
    /// Fails if the registry or router is missing, or if any init hook fails.
    pub async fn build(self) -> Result<Application> {
        let registry = self
            .registry
            .ok_or(LifecycleError::Incomplete("registry"))?;
        let router = self
            .router
            .ok_or(LifecycleError::Incomplete("router"))?;


        match self.init_timeout {
            Some(timeout) => {
                self.lifecycle_manager
                    .call_module_init_with_timeout(timeout)
                    .await?
            }
            None => self.lifecycle_manager.call_module_init().await?,
        }

        Ok(Application {
            registry,
            router,
            lifecycle_manager: Arc::new(self.lifecycle_manager),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        inits: AtomicUsize,
        destroys: AtomicUsize,
    }

    #[async_trait]
    impl OnModuleInit for Counter {
        async fn on_module_init(&self) -> crate::error::Result<()> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl OnModuleDestroy for Counter {
        async fn on_module_destroy(&self) -> crate::error::Result<()> {
            self.destroys.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn build_requires_a_router() {
        let result = Application::builder().registry(Registry::new()).build().await;
        assert!(matches!(result, Err(LifecycleError::Incomplete("router"))));
    }

    #[tokio::test]
    async fn serve_until_runs_destroy_hooks() {
        let counter = Arc::new(Counter::default());
        let app = Application::builder()
            .registry(Registry::new())
            .router(Router::new())
            .register_lifecycle(counter.clone(), "counter")
            .build()
            .await
            .unwrap();
        assert_eq!(counter.inits.load(Ordering::SeqCst), 1);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        app.serve_until(listener, async {}).await.unwrap();

        assert_eq!(counter.destroys.load(Ordering::SeqCst), 1);
    }
}
