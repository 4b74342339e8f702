use async_trait::async_trait;

use crate::{QueryResult, RosterError, Value};

/// A relational store the engine can read from and open transactions on.
///
/// Parameters are bound positionally to `?` placeholders; implementations
/// must never splice parameter values into the statement text.
#[async_trait(?Send)]
pub trait RosterBackend: Send + Sync {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError>;

    async fn begin_transaction(&self) -> Result<Box<dyn RosterTransaction + '_>, RosterError>;
}

/// One open transaction on one connection.
///
/// `commit` and `rollback` consume the transaction; the underlying connection
/// is released when the box is dropped. Dropping an unfinished transaction
/// must roll it back.
#[async_trait(?Send)]
pub trait RosterTransaction {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError>;

    async fn commit(self: Box<Self>) -> Result<(), RosterError>;

    async fn rollback(self: Box<Self>) -> Result<(), RosterError>;
}
