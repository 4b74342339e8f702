use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{RosterBackend, RosterTransaction};
use crate::{QueryResult, RosterError, Value};

pub(crate) fn rows(rows: Vec<Vec<Value>>) -> QueryResult {
    QueryResult {
        rows,
        columns: Vec::new(),
    }
}

pub(crate) fn ids(ids: &[i64]) -> QueryResult {
    rows(ids.iter().map(|id| vec![Value::Integer(*id)]).collect())
}

/// Records every statement and answers with scripted results, in order.
/// Unscripted statements succeed with an empty result.
#[derive(Default)]
pub(crate) struct ScriptedTransaction {
    pub executed: Vec<(String, Vec<Value>)>,
    pub responses: VecDeque<Result<QueryResult, RosterError>>,
}

impl ScriptedTransaction {
    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<QueryResult, RosterError>>,
    ) -> Self {
        Self {
            executed: Vec::new(),
            responses: responses.into_iter().collect(),
        }
    }
}

#[async_trait(?Send)]
impl RosterTransaction for ScriptedTransaction {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        self.executed.push((sql.to_string(), params.to_vec()));
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::default()))
    }

    async fn commit(self: Box<Self>) -> Result<(), RosterError> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RosterError> {
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct LifecycleCounters {
    pub begun: AtomicUsize,
    pub committed: AtomicUsize,
    pub rolled_back: AtomicUsize,
    pub released: AtomicUsize,
    pub executed: Mutex<Vec<String>>,
}

pub(crate) fn load(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Backend whose transactions count their lifecycle events and can be told
/// to fail at a given statement, on commit, or on rollback.
#[derive(Default)]
pub(crate) struct CountingBackend {
    pub counters: Arc<LifecycleCounters>,
    pub fail_statement_containing: Option<String>,
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub fail_rollback: bool,
}

pub(crate) struct CountingTransaction {
    counters: Arc<LifecycleCounters>,
    fail_statement_containing: Option<String>,
    fail_commit: bool,
    fail_rollback: bool,
}

#[async_trait(?Send)]
impl RosterBackend for CountingBackend {
    async fn execute(&self, sql: &str, _params: &[Value]) -> Result<QueryResult, RosterError> {
        self.counters
            .executed
            .lock()
            .expect("lock")
            .push(sql.to_string());
        Ok(QueryResult::default())
    }

    async fn begin_transaction(&self) -> Result<Box<dyn RosterTransaction + '_>, RosterError> {
        if self.fail_begin {
            return Err(crate::errors::store_unavailable_error("no connection"));
        }
        self.counters.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingTransaction {
            counters: Arc::clone(&self.counters),
            fail_statement_containing: self.fail_statement_containing.clone(),
            fail_commit: self.fail_commit,
            fail_rollback: self.fail_rollback,
        }))
    }
}

#[async_trait(?Send)]
impl RosterTransaction for CountingTransaction {
    async fn execute(&mut self, sql: &str, _params: &[Value]) -> Result<QueryResult, RosterError> {
        self.counters
            .executed
            .lock()
            .expect("lock")
            .push(sql.to_string());
        if let Some(needle) = &self.fail_statement_containing {
            if sql.contains(needle.as_str()) {
                return Err(crate::errors::store_failure_error(
                    "UNIQUE constraint failed: roster_record.primary_name",
                ));
            }
        }
        Ok(QueryResult::default())
    }

    async fn commit(self: Box<Self>) -> Result<(), RosterError> {
        if self.fail_commit {
            return Err(crate::errors::store_failure_error("database is locked"));
        }
        self.counters.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RosterError> {
        if self.fail_rollback {
            return Err(crate::errors::store_failure_error("rollback failed"));
        }
        self.counters.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for CountingTransaction {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
