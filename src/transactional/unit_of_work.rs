use crate::error::{Result, ShelfwiseError};
use crate::transactional::TransactionOptions;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use strum_macros::Display;
use tokio::sync::{RwLock, RwLockReadGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransactionState {
    Open,
    Committed,
    RolledBack,
}

enum TransactionSlot {
    Open(DatabaseTransaction),
    Committed,
    RolledBack,
}

impl TransactionSlot {
    fn state(&self) -> TransactionState {
        match self {
            TransactionSlot::Open(_) => TransactionState::Open,
            TransactionSlot::Committed => TransactionState::Committed,
            TransactionSlot::RolledBack => TransactionState::RolledBack,
        }
    }
}

/// One open database transaction, shared by reference with every call that
/// must observe it.
///
/// Clones are handles to the same transaction. The transaction ends exactly
/// once, through [`commit`](Self::commit) or [`rollback`](Self::rollback);
/// afterwards every operation fails with `TransactionClosed`. A unit of work
/// dropped while still open is rolled back by the driver.
#[derive(Clone)]
pub struct UnitOfWork {
    inner: Arc<Inner>,
}

struct Inner {
    id: Uuid,
    slot: RwLock<TransactionSlot>,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection, options: &TransactionOptions) -> Result<Self> {
        let transaction = db
            .begin_with_config(options.isolation.map(Into::into), options.access_mode())
            .await?;
        let uow = Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                slot: RwLock::new(TransactionSlot::Open(transaction)),
            }),
        };
        tracing::debug!(unit_of_work = %uow.id(), ?options, "Transaction started");
        Ok(uow)
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Whether both handles point at the same transaction.
    pub fn same_as(&self, other: &UnitOfWork) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub async fn state(&self) -> TransactionState {
        self.inner.slot.read().await.state()
    }

    /// Borrows the live transaction for the duration of one repository
    /// operation. Callers must drop the guard before committing.
    pub async fn connection(&self) -> Result<RwLockReadGuard<'_, DatabaseTransaction>> {
        let slot = self.inner.slot.read().await;
        RwLockReadGuard::try_map(slot, |slot| match slot {
            TransactionSlot::Open(transaction) => Some(transaction),
            _ => None,
        })
        .map_err(|slot| ShelfwiseError::TransactionClosed {
            state: slot.state().to_string(),
        })
    }

    pub async fn commit(&self) -> Result<()> {
        let transaction = self.take(TransactionSlot::Committed).await?;
        if let Err(err) = transaction.commit().await {
            *self.inner.slot.write().await = TransactionSlot::RolledBack;
            tracing::error!(unit_of_work = %self.id(), error = %err, "Commit failed");
            return Err(err.into());
        }
        tracing::debug!(unit_of_work = %self.id(), "Transaction committed");
        Ok(())
    }

    pub async fn rollback(&self) -> Result<()> {
        let transaction = self.take(TransactionSlot::RolledBack).await?;
        transaction.rollback().await?;
        tracing::debug!(unit_of_work = %self.id(), "Transaction rolled back");
        Ok(())
    }

    async fn take(&self, terminal: TransactionSlot) -> Result<DatabaseTransaction> {
        let mut slot = self.inner.slot.write().await;
        match std::mem::replace(&mut *slot, terminal) {
            TransactionSlot::Open(transaction) => Ok(transaction),
            closed => {
                let state = closed.state();
                *slot = closed;
                Err(ShelfwiseError::TransactionClosed {
                    state: state.to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitOfWork")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactional::test_support::{count_notes, insert_note, notes_database};

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let db = notes_database().await;
        let uow = UnitOfWork::begin(&db, &TransactionOptions::default()).await.unwrap();

        insert_note(&*uow.connection().await.unwrap(), "kept").await;
        uow.commit().await.unwrap();

        assert_eq!(uow.state().await, TransactionState::Committed);
        assert_eq!(count_notes(&db).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = notes_database().await;
        let uow = UnitOfWork::begin(&db, &TransactionOptions::default()).await.unwrap();

        insert_note(&*uow.connection().await.unwrap(), "discarded").await;
        uow.rollback().await.unwrap();

        assert_eq!(count_notes(&db).await, 0);
    }

    #[tokio::test]
    async fn test_terminal_states_are_final() {
        let db = notes_database().await;
        let uow = UnitOfWork::begin(&db, &TransactionOptions::default()).await.unwrap();
        uow.rollback().await.unwrap();

        assert!(matches!(
            uow.commit().await,
            Err(ShelfwiseError::TransactionClosed { ref state }) if state == "rolledback"
        ));
        assert!(uow.rollback().await.is_err());
        assert!(uow.connection().await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_the_transaction() {
        let db = notes_database().await;
        let uow = UnitOfWork::begin(&db, &TransactionOptions::default()).await.unwrap();
        let handle = uow.clone();

        insert_note(&*handle.connection().await.unwrap(), "shared").await;
        assert_eq!(count_notes(&*uow.connection().await.unwrap()).await, 1);
        assert!(uow.same_as(&handle));
        assert_eq!(uow.id(), handle.id());

        handle.commit().await.unwrap();
        assert_eq!(uow.state().await, TransactionState::Committed);
    }
}
