//! Database pool handle and schema synchronisation.
//!
//! [`Database`] is owned by the composition root: [`DbModule`] opens it while
//! the registry is built and registers it as a value entry, and the
//! application closes it from its destroy hook.

use crate::config::DatabaseConfig;
use crate::di::{Key, Registry};
use crate::domain::{
    address, author, author_book, book, book_category, category, customer, user,
};
use crate::error::{Result, ShelfwiseError};
use crate::lifecycle::{OnModuleDestroy, OnModuleInit};
use crate::module::Module;
use crate::transactional::{TransactionRunner, UnitOfWork};
use async_trait::async_trait;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{
    ConnectOptions, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Schema,
};
use std::time::Duration;

pub const DATABASE: Key<Database> = Key::new("database");
pub const TRANSACTION_RUNNER: Key<TransactionRunner> = Key::new("transactionRunner");
/// Registered only inside test scopes, holding the test's unit of work.
pub const UNIT_OF_WORK: Key<UnitOfWork> = Key::new("unitOfWork");

#[derive(Clone, Debug)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Opens the pool. In-memory SQLite is pinned to a single connection,
    /// since every connection would otherwise see its own empty database.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        if is_in_memory(&config.url) {
            options.max_connections(1).min_connections(1);
        } else {
            options.max_connections(config.max_connections);
        }
        options
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = sea_orm::Database::connect(options).await?;
        tracing::info!(
            backend = ?connection.get_database_backend(),
            "Database connected"
        );
        Ok(Self { connection })
    }

    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn backend(&self) -> DbBackend {
        self.connection.get_database_backend()
    }

    /// Creates every table and composite unique index that does not exist yet.
    pub async fn sync_schema(&self) -> Result<()> {
        // Referenced tables first.
        self.create_table(user::entity::Entity).await?;
        self.create_table(customer::entity::Entity).await?;
        self.create_table(address::entity::Entity).await?;
        self.create_table(author::entity::Entity).await?;
        self.create_table(book::entity::Entity).await?;
        self.create_table(category::entity::Entity).await?;
        self.create_table(author_book::entity::Entity).await?;
        self.create_table(book_category::entity::Entity).await?;

        self.create_index(
            Index::create()
                .name("uq_author_books_author_id_book_id")
                .table(author_book::entity::Entity)
                .col(author_book::entity::Column::AuthorId)
                .col(author_book::entity::Column::BookId)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await?;
        self.create_index(
            Index::create()
                .name("uq_book_categories_book_id_category_id")
                .table(book_category::entity::Entity)
                .col(book_category::entity::Column::BookId)
                .col(book_category::entity::Column::CategoryId)
                .unique()
                .if_not_exists()
                .to_owned(),
        )
        .await?;

        tracing::info!("Database schema synchronised");
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        Ok(self.connection.ping().await?)
    }

    /// Closes the pool for every clone of this handle.
    pub async fn close(&self) -> Result<()> {
        self.connection.clone().close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<()> {
        let backend = self.backend();
        let statement = Schema::new(backend)
            .create_table_from_entity(entity)
            .if_not_exists()
            .to_owned();
        self.connection.execute(backend.build(&statement)).await?;
        Ok(())
    }

    async fn create_index(&self, statement: IndexCreateStatement) -> Result<()> {
        let backend = self.backend();
        self.connection.execute(backend.build(&statement)).await?;
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || (url.starts_with("sqlite:") && url.contains("mode=memory"))
}

#[async_trait]
impl OnModuleInit for Database {
    async fn on_module_init(&self) -> Result<()> {
        self.ping().await
    }
}

#[async_trait]
impl OnModuleDestroy for Database {
    async fn on_module_destroy(&self) -> Result<()> {
        self.close().await
    }
}

enum Source {
    Config(DatabaseConfig),
    Existing(Database),
}

/// Opens the pool, synchronises the schema, and registers [`DATABASE`] and
/// the scoped [`TRANSACTION_RUNNER`].
pub struct DbModule {
    source: Source,
}

impl DbModule {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            source: Source::Config(config),
        }
    }

    /// Uses an already opened pool instead of connecting.
    pub fn with_database(database: Database) -> Self {
        Self {
            source: Source::Existing(database),
        }
    }

    async fn open(&self) -> Result<Database> {
        let database = match &self.source {
            Source::Config(config) => Database::connect(config).await?,
            Source::Existing(database) => database.clone(),
        };
        database.sync_schema().await?;
        Ok(database)
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn register(&self, registry: &Registry) -> Result<()> {
        let database = self
            .open()
            .await
            .map_err(|e| ShelfwiseError::ModuleRegistrationFailed {
                module: self.name().to_string(),
                message: e.to_string(),
            })?;

        registry.register([
            DATABASE.value(database),
            TRANSACTION_RUNNER.scoped(|r| {
                Ok(TransactionRunner::new(r.resolve(&DATABASE)?.connection().clone()))
            }),
        ]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::build_registry;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 10,
        }
    }

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:shelf?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://shelf.db"));
        assert!(!is_in_memory("postgres://u:p@localhost/shelf"));
    }

    #[tokio::test]
    async fn sync_schema_is_repeatable() {
        let database = Database::connect(&memory_config()).await.unwrap();
        database.sync_schema().await.unwrap();
        database.sync_schema().await.unwrap();
        database.ping().await.unwrap();
    }

    #[tokio::test]
    async fn module_registers_pool_and_runner() {
        let registry = build_registry(vec![Box::new(DbModule::new(memory_config()))])
            .await
            .unwrap();

        assert!(registry.contains(DATABASE.name()));
        let runner = registry.resolve(&TRANSACTION_RUNNER).unwrap();
        assert!(!runner.is_pinned());

        let scope = registry.create_scope();
        let scoped_runner = scope.resolve(&TRANSACTION_RUNNER).unwrap();
        assert!(!std::sync::Arc::ptr_eq(&runner, &scoped_runner));
    }

    #[tokio::test]
    async fn unreachable_database_fails_the_module() {
        let module = DbModule::new(DatabaseConfig {
            url: "sqlite:///nonexistent-dir/shelf.db?mode=ro".to_string(),
            max_connections: 1,
        });

        let err = build_registry(vec![Box::new(module)]).await.unwrap_err();
        assert!(matches!(
            err,
            ShelfwiseError::ModuleRegistrationFailed { ref module, .. } if module == "db"
        ));
    }
}
