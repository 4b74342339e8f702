use std::future::Future;
use std::pin::Pin;

use futures_util::FutureExt;

use crate::backend::{RosterBackend, RosterTransaction};
use crate::errors;
use crate::RosterError;

pub type ImportTransactionFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RosterError>> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionPhase {
    Idle,
    Started,
    ResolvingExisting,
    Reconciling,
    Upserting,
    Committed,
    RolledBack,
    Released,
}

/// The single transaction an import runs in. Consumed by commit or
/// rollback, which also releases the connection.
#[must_use = "ImportTransaction must be committed or rolled back"]
pub struct ImportTransaction<'a> {
    inner: Box<dyn RosterTransaction + 'a>,
    phase: TransactionPhase,
}

impl<'a> ImportTransaction<'a> {
    fn started(inner: Box<dyn RosterTransaction + 'a>) -> Self {
        tracing::debug!(phase = ?TransactionPhase::Started, "import transaction");
        Self {
            inner,
            phase: TransactionPhase::Started,
        }
    }

    pub fn phase(&self) -> TransactionPhase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: TransactionPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "import transaction");
        self.phase = phase;
    }

    pub(crate) fn store(&mut self) -> &mut dyn RosterTransaction {
        self.inner.as_mut()
    }

    async fn commit(self) -> Result<(), RosterError> {
        let result = self.inner.commit().await;
        if result.is_ok() {
            tracing::debug!(phase = ?TransactionPhase::Committed, "import transaction");
        }
        tracing::debug!(phase = ?TransactionPhase::Released, "import transaction");
        result
    }

    /// Rolls back and releases. A failing rollback is logged; it never
    /// replaces the error that caused it.
    async fn rollback(self) {
        match self.inner.rollback().await {
            Ok(()) => {
                tracing::debug!(phase = ?TransactionPhase::RolledBack, "import transaction")
            }
            Err(error) => tracing::error!(error = %error, "import rollback failed"),
        }
        tracing::debug!(phase = ?TransactionPhase::Released, "import transaction");
    }
}

/// Runs `f` inside one store transaction. Success commits; an error, a
/// failed commit or a panic rolls everything back. Errors surface as the
/// opaque bulk-import error with the cause logged; panics are resumed after
/// the rollback.
pub(crate) async fn run_in_transaction<T, F>(
    backend: &dyn RosterBackend,
    f: F,
) -> Result<T, RosterError>
where
    F: for<'tx> FnOnce(&'tx mut ImportTransaction<'_>) -> ImportTransactionFuture<'tx, T>,
{
    let inner = match backend.begin_transaction().await {
        Ok(inner) => inner,
        Err(error) => {
            tracing::error!(error = %error, "failed to start import transaction");
            return Err(errors::bulk_import_failed_error());
        }
    };
    let mut transaction = ImportTransaction::started(inner);

    match std::panic::AssertUnwindSafe(f(&mut transaction))
        .catch_unwind()
        .await
    {
        Ok(Ok(value)) => match transaction.commit().await {
            Ok(()) => Ok(value),
            Err(error) => {
                tracing::error!(error = %error, "import commit failed");
                Err(errors::bulk_import_failed_error())
            }
        },
        Ok(Err(error)) => {
            tracing::error!(
                error = %error,
                code = %error.code,
                phase = ?transaction.phase(),
                "import failed, rolling back"
            );
            transaction.rollback().await;
            Err(errors::bulk_import_failed_error())
        }
        Err(payload) => {
            tracing::error!(phase = ?transaction.phase(), "import panicked, rolling back");
            transaction.rollback().await;
            std::panic::resume_unwind(payload);
        }
    }
}
