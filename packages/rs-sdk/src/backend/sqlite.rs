use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use roster_engine::errors::{store_failure_error, store_unavailable_error};
use roster_engine::{QueryResult, RosterBackend, RosterError, RosterTransaction, Value};
use rusqlite::{params_from_iter, Connection, Row};

pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

struct SqliteTransaction<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl SqliteBackend {
    pub fn in_memory() -> Result<Self, RosterError> {
        let conn = Connection::open_in_memory().map_err(store_unavailable_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (or creates) a database file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|err| {
            store_unavailable_error(format!("failed to open {}: {err}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "opened sqlite database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RosterError> {
        self.conn
            .lock()
            .map_err(|_| store_unavailable_error("sqlite mutex poisoned"))
    }
}

#[async_trait(?Send)]
impl RosterBackend for SqliteBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        let conn = self.lock()?;
        run_statement(&conn, sql, params)
    }

    async fn begin_transaction(&self) -> Result<Box<dyn RosterTransaction + '_>, RosterError> {
        let conn = self.lock()?;
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(store_failure_error)?;
        Ok(Box::new(SqliteTransaction {
            conn,
            finished: false,
        }))
    }
}

#[async_trait(?Send)]
impl RosterTransaction for SqliteTransaction<'_> {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        run_statement(&self.conn, sql, params)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), RosterError> {
        self.finished = true;
        if let Err(err) = self.conn.execute_batch("COMMIT") {
            // a failed COMMIT can leave the transaction open
            if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!(
                    error = %rollback_err,
                    commit_error = %err,
                    "rollback after failed sqlite commit failed"
                );
            }
            return Err(store_failure_error(err));
        }
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), RosterError> {
        self.finished = true;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(store_failure_error)
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.conn.execute_batch("ROLLBACK") {
            tracing::warn!(error = %err, "rollback of abandoned sqlite transaction failed");
        }
    }
}

fn run_statement(conn: &Connection, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
    if params.is_empty() && sql.trim_end().trim_end_matches(';').contains(';') {
        conn.execute_batch(sql).map_err(store_failure_error)?;
        return Ok(QueryResult::default());
    }

    let mut stmt = conn.prepare(sql).map_err(store_failure_error)?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let bound_params = params.iter().cloned().map(to_sql_value);
    let mut rows = stmt
        .query(params_from_iter(bound_params))
        .map_err(store_failure_error)?;
    let mut result_rows = Vec::new();
    while let Some(row) = rows.next().map_err(store_failure_error)? {
        result_rows.push(map_row(row)?);
    }
    Ok(QueryResult {
        rows: result_rows,
        columns,
    })
}

fn map_row(row: &Row<'_>) -> Result<Vec<Value>, RosterError> {
    let mut values = Vec::new();
    for idx in 0..row.as_ref().column_count() {
        let value = row.get_ref(idx).map_err(store_failure_error)?;
        values.push(match value {
            rusqlite::types::ValueRef::Null => Value::Null,
            rusqlite::types::ValueRef::Integer(value) => Value::Integer(value),
            rusqlite::types::ValueRef::Real(value) => Value::Real(value),
            rusqlite::types::ValueRef::Text(value) => {
                Value::Text(String::from_utf8_lossy(value).to_string())
            }
            rusqlite::types::ValueRef::Blob(value) => Value::Blob(value.to_vec()),
        });
    }
    Ok(values)
}

fn to_sql_value(value: Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Integer(value) => rusqlite::types::Value::Integer(value),
        Value::Real(value) => rusqlite::types::Value::Real(value),
        Value::Text(value) => rusqlite::types::Value::Text(value),
        Value::Blob(value) => rusqlite::types::Value::Blob(value),
    }
}
