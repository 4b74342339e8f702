mod transaction;

pub use transaction::{ImportTransaction, ImportTransactionFuture, TransactionPhase};
pub(crate) use transaction::run_in_transaction;
