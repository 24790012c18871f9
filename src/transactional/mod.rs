//! Unit of work and transaction boundaries.
//!
//! A [`UnitOfWork`] owns exactly one open database transaction. Services that
//! need several repository calls to be atomic take a `&UnitOfWork` and hand it
//! to repository factories; the [`TransactionRunner`] is the only code that
//! commits or rolls one back.
//!
//! ```rust,ignore
//! let book = runner
//!     .run_in_transaction(|uow| async move {
//!         let book = books.create(&uow).create_one(new_book).await?;
//!         author_books.create(&uow).create_one(link).await?;
//!         Ok(book)
//!     })
//!     .await?;
//! ```
//!
//! Calling `run_in_transaction` while a unit of work is already active joins
//! it instead of nesting: only the outermost call commits or rolls back.

mod runner;
mod unit_of_work;

pub use runner::{TransactionRunner, current_unit_of_work};
pub use unit_of_work::{TransactionState, UnitOfWork};

/// Transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// **Level 0: Read Uncommitted**
    ///
    /// May read rows written by other transactions that have not committed.
    ReadUncommitted,

    /// **Level 1: Read Committed**
    ///
    /// Every read sees only committed data, but two reads of the same row may
    /// differ if another transaction commits in between. Default for PostgreSQL.
    ReadCommitted,

    /// **Level 2: Repeatable Read**
    ///
    /// Rows read once read the same until the transaction ends.
    RepeatableRead,

    /// **Level 3: Serializable**
    ///
    /// Same outcome as if transactions ran one after another.
    Serializable,
}

impl From<IsolationLevel> for sea_orm::IsolationLevel {
    fn from(level: IsolationLevel) -> Self {
        match level {
            IsolationLevel::ReadUncommitted => sea_orm::IsolationLevel::ReadUncommitted,
            IsolationLevel::ReadCommitted => sea_orm::IsolationLevel::ReadCommitted,
            IsolationLevel::RepeatableRead => sea_orm::IsolationLevel::RepeatableRead,
            IsolationLevel::Serializable => sea_orm::IsolationLevel::Serializable,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// `None` keeps the database default.
    pub isolation: Option<IsolationLevel>,
    pub read_only: bool,
}

impl TransactionOptions {
    pub fn read_only() -> Self {
        Self {
            isolation: None,
            read_only: true,
        }
    }

    pub fn with_isolation(mut self, isolation: IsolationLevel) -> Self {
        self.isolation = Some(isolation);
        self
    }

    pub(crate) fn access_mode(&self) -> Option<sea_orm::AccessMode> {
        self.read_only.then_some(sea_orm::AccessMode::ReadOnly)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
    use std::time::Duration;

    /// Single-connection in-memory SQLite with a scratch `notes` table.
    pub async fn notes_database() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        db.execute_unprepared("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL)")
            .await
            .unwrap();
        db
    }

    pub async fn count_notes<C: ConnectionTrait>(conn: &C) -> i64 {
        let row = conn
            .query_one(Statement::from_string(
                conn.get_database_backend(),
                "SELECT COUNT(*) AS n FROM notes",
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    pub async fn insert_note<C: ConnectionTrait>(conn: &C, body: &str) {
        conn.execute(Statement::from_sql_and_values(
            conn.get_database_backend(),
            "INSERT INTO notes (body) VALUES (?)",
            [body.into()],
        ))
        .await
        .unwrap();
    }
}
