use crate::context::{TestContext, TestServerContext};
use futures::FutureExt;
use shelfwise::app::{build_router, default_modules};
use shelfwise::config::{AppConfig, AuthConfig, DatabaseConfig, HttpConfig};
use shelfwise::database::{TRANSACTION_RUNNER, UNIT_OF_WORK};
use shelfwise::di::Registry;
use shelfwise::error::{Result, ShelfwiseError};
use shelfwise::lifecycle::Application;
use shelfwise::module::build_registry;
use shelfwise::transactional::TransactionOptions;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Settings for an isolated test run: a private in-memory database and
/// cheap password hashing.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        http: HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthConfig {
            jwt_secret: "shelfwise-test-secret".to_string(),
            jwt_expires_in: 3600,
            hash_memory_kib: 8,
            hash_iterations: 1,
        },
        log_level: "warn".to_string(),
    }
}

/// The application's module graph over a fresh database.
pub struct TestEnvironment {
    config: AppConfig,
    registry: Registry,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Result<Self> {
        let registry = build_registry(default_modules(&config)).await?;
        Ok(Self { config, registry })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs `body` against a scope whose unit of work is rolled back
    /// afterwards, whatever `body` does.
    ///
    /// Panics inside `body` are re-raised after the rollback. If `body`
    /// finished the unit of work itself the rollback error is returned.
    pub async fn run_in_test_transaction<T, F, Fut>(&self, body: F) -> Result<T>
    where
        F: FnOnce(TestContext) -> Fut,
        Fut: Future<Output = T>,
    {
        let context = self.open_context().await?;
        let uow = context.uow.clone();

        let outcome = AssertUnwindSafe(body(context)).catch_unwind().await;
        let rollback = uow.rollback().await;

        match outcome {
            Ok(value) => rollback.map(|()| value),
            Err(panic) => {
                if let Err(err) = rollback {
                    tracing::error!(error = %err, "Rollback after panic failed");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Like [`run_in_test_transaction`](Self::run_in_test_transaction), with
    /// the HTTP application served on a loopback port for the duration of
    /// `body`. Requests handled by the server join the test's unit of work.
    pub async fn run_in_test_server_transaction<T, F, Fut>(&self, body: F) -> Result<T>
    where
        F: FnOnce(TestServerContext) -> Fut,
        Fut: Future<Output = T>,
    {
        let context = self.open_context().await?;
        let uow = context.uow.clone();

        let server = match self.start_server(&context).await {
            Ok(server) => server,
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback after failed start failed");
                }
                return Err(err);
            }
        };

        let server_context = TestServerContext {
            context,
            base_url: server.base_url.clone(),
            client: reqwest::Client::new(),
        };

        let outcome = AssertUnwindSafe(body(server_context)).catch_unwind().await;

        let stopped = server.stop().await;
        let rollback = uow.rollback().await;

        match outcome {
            Ok(value) => {
                stopped?;
                rollback.map(|()| value)
            }
            Err(panic) => {
                if let Err(err) = stopped.and(rollback) {
                    tracing::error!(error = %err, "Cleanup after panic failed");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }

    async fn open_context(&self) -> Result<TestContext> {
        let runner = self.registry.resolve(&TRANSACTION_RUNNER)?;
        let uow = runner.begin(TransactionOptions::default()).await?;

        let scope = self.registry.create_scope();
        scope.register([
            UNIT_OF_WORK.value(uow.clone()),
            TRANSACTION_RUNNER.value(runner.pinned_to(uow.clone())),
        ]);

        tracing::debug!(unit_of_work = %uow.id(), "Opened test transaction");
        Ok(TestContext { uow, scope })
    }

    async fn start_server(&self, context: &TestContext) -> Result<RunningServer> {
        let router = build_router(&context.scope)?;
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| ShelfwiseError::Internal(format!("bind test listener: {e}")))?;
        let address = listener
            .local_addr()
            .map_err(|e| ShelfwiseError::Internal(format!("read test listener address: {e}")))?;

        let application = Application::builder()
            .registry(context.scope.clone())
            .router(router)
            .build()
            .await
            .map_err(|e| ShelfwiseError::Internal(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            application
                .serve_until(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(RunningServer {
            base_url: format!("http://{address}"),
            shutdown: shutdown_tx,
            handle,
        })
    }
}

struct RunningServer {
    base_url: String,
    shutdown: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<shelfwise::lifecycle::Result<()>>,
}

impl RunningServer {
    async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        match self.handle.await {
            Ok(served) => served.map_err(|e| ShelfwiseError::Internal(e.to_string())),
            Err(join) => Err(ShelfwiseError::Internal(format!("test server task: {join}"))),
        }
    }
}

