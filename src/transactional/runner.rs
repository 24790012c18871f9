use crate::error::Result;
use crate::transactional::{TransactionOptions, UnitOfWork};
use sea_orm::DatabaseConnection;
use std::future::Future;

tokio::task_local! {
    /// Unit of work opened by the innermost enclosing `run_in_transaction`
    /// on this task.
    static CURRENT_UNIT_OF_WORK: UnitOfWork;
}

/// Unit of work active on the current task, if any.
pub fn current_unit_of_work() -> Option<UnitOfWork> {
    CURRENT_UNIT_OF_WORK.try_with(UnitOfWork::clone).ok()
}

/// Opens, joins, and finishes units of work.
///
/// A runner normally begins a fresh transaction per call. A runner built
/// with [`pinned_to`](Self::pinned_to) instead always joins the given unit of
/// work and never finishes it; the test harness registers such a runner so
/// that request handlers share the test's transaction.
#[derive(Clone)]
pub struct TransactionRunner {
    connection: DatabaseConnection,
    pinned: Option<UnitOfWork>,
}

impl TransactionRunner {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            pinned: None,
        }
    }

    /// A runner whose every transaction joins `uow`.
    pub fn pinned_to(&self, uow: UnitOfWork) -> Self {
        Self {
            connection: self.connection.clone(),
            pinned: Some(uow),
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// Opens a new unit of work. The caller owns finishing it.
    pub async fn begin(&self, options: TransactionOptions) -> Result<UnitOfWork> {
        UnitOfWork::begin(&self.connection, &options).await
    }

    pub async fn run_in_transaction<T, F, Fut>(&self, work: F) -> Result<T>
    where
        F: FnOnce(UnitOfWork) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_in_transaction_with(TransactionOptions::default(), work)
            .await
    }

    /// Runs `work` inside a unit of work.
    ///
    /// If one is already active (pinned, or opened further up this task),
    /// `work` joins it and its outcome is left to the owner. Otherwise a new
    /// unit of work is opened, committed when `work` succeeds, and rolled
    /// back when it fails; the error from `work` is returned unchanged.
    pub async fn run_in_transaction_with<T, F, Fut>(
        &self,
        options: TransactionOptions,
        work: F,
    ) -> Result<T>
    where
        F: FnOnce(UnitOfWork) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(active) = self.active() {
            tracing::trace!(unit_of_work = %active.id(), "Joining active unit of work");
            return CURRENT_UNIT_OF_WORK
                .scope(active.clone(), work(active))
                .await;
        }

        let uow = self.begin(options).await?;
        let outcome = CURRENT_UNIT_OF_WORK.scope(uow.clone(), work(uow.clone())).await;

        match outcome {
            Ok(value) => {
                uow.commit().await?;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(unit_of_work = %uow.id(), error = %err, "Rolling back");
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::error!(
                        unit_of_work = %uow.id(),
                        error = %rollback_err,
                        "Rollback failed"
                    );
                }
                Err(err)
            }
        }
    }

    fn active(&self) -> Option<UnitOfWork> {
        self.pinned.clone().or_else(current_unit_of_work)
    }
}

impl std::fmt::Debug for TransactionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionRunner")
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShelfwiseError;
    use crate::transactional::TransactionState;
    use crate::transactional::test_support::{count_notes, insert_note, notes_database};

    #[tokio::test]
    async fn test_commits_on_success() {
        let db = notes_database().await;
        let runner = TransactionRunner::new(db.clone());

        let id = runner
            .run_in_transaction(|uow| async move {
                insert_note(&*uow.connection().await?, "w1").await;
                Ok(uow.id())
            })
            .await
            .unwrap();

        assert_ne!(id, uuid::Uuid::nil());
        assert_eq!(count_notes(&db).await, 1);
        assert!(current_unit_of_work().is_none());
    }

    #[tokio::test]
    async fn test_failure_rolls_back_every_write() {
        let db = notes_database().await;
        let runner = TransactionRunner::new(db.clone());

        let result: Result<()> = runner
            .run_in_transaction(|uow| async move {
                insert_note(&*uow.connection().await?, "w1").await;
                Err(ShelfwiseError::not_found("note", "w2"))
            })
            .await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(count_notes(&db).await, 0);
    }

    #[tokio::test]
    async fn test_nested_call_joins_outer_unit_of_work() {
        let db = notes_database().await;
        let runner = TransactionRunner::new(db.clone());
        let inner_runner = runner.clone();

        let result: Result<()> = runner
            .run_in_transaction(|outer| async move {
                insert_note(&*outer.connection().await?, "outer").await;

                inner_runner
                    .run_in_transaction(|inner| async move {
                        assert_eq!(inner.id(), outer.id());
                        insert_note(&*inner.connection().await?, "inner").await;
                        Err(ShelfwiseError::already_exists("note", "inner"))
                    })
                    .await
            })
            .await;

        assert!(result.unwrap_err().is_already_exists());
        assert_eq!(count_notes(&db).await, 0);
    }

    #[tokio::test]
    async fn test_pinned_runner_never_finishes_the_unit_of_work() {
        let db = notes_database().await;
        let runner = TransactionRunner::new(db.clone());
        let uow = runner.begin(TransactionOptions::default()).await.unwrap();
        let pinned = runner.pinned_to(uow.clone());

        let failed: Result<()> = pinned
            .run_in_transaction(|joined| async move {
                insert_note(&*joined.connection().await?, "seed").await;
                Err(ShelfwiseError::Internal("boom".into()))
            })
            .await;
        assert!(failed.is_err());

        assert_eq!(uow.state().await, TransactionState::Open);
        assert_eq!(count_notes(&*uow.connection().await.unwrap()).await, 1);

        uow.rollback().await.unwrap();
        assert_eq!(count_notes(&db).await, 0);
    }
}
