use async_trait::async_trait;
use roster_engine::{QueryResult, RosterBackend, RosterError, RosterTransaction, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Column, Row, Sqlite, SqlitePool, ValueRef};
use tokio::sync::OnceCell;

/// In-memory SQLite over a single-connection sqlx pool. One connection keeps
/// the in-memory database alive and makes every statement share it.
pub struct SqliteBackend {
    pool: OnceCell<SqlitePool>,
}

struct SqliteTransaction {
    transaction: sqlx::Transaction<'static, Sqlite>,
}

impl SqliteBackend {
    pub fn in_memory() -> Self {
        Self {
            pool: OnceCell::const_new(),
        }
    }

    async fn pool(&self) -> Result<&SqlitePool, RosterError> {
        self.pool
            .get_or_try_init(|| async {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect("sqlite::memory:")
                    .await
                    .map_err(store_error)
            })
            .await
    }
}

#[async_trait(?Send)]
impl RosterBackend for SqliteBackend {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        let pool = self.pool().await?;
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_sqlite(query, param);
        }
        let rows = query.fetch_all(pool).await.map_err(store_error)?;
        map_rows(rows)
    }

    async fn begin_transaction(&self) -> Result<Box<dyn RosterTransaction + '_>, RosterError> {
        let pool = self.pool().await?;
        let transaction = pool.begin().await.map_err(store_error)?;
        Ok(Box::new(SqliteTransaction { transaction }))
    }
}

#[async_trait(?Send)]
impl RosterTransaction for SqliteTransaction {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_sqlite(query, param);
        }
        let rows = query
            .fetch_all(&mut *self.transaction)
            .await
            .map_err(store_error)?;
        map_rows(rows)
    }

    async fn commit(self: Box<Self>) -> Result<(), RosterError> {
        self.transaction.commit().await.map_err(store_error)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RosterError> {
        self.transaction.rollback().await.map_err(store_error)
    }
}

fn store_error(error: sqlx::Error) -> RosterError {
    roster_engine::errors::store_failure_error(error)
}

fn bind_sqlite<'q>(
    query: sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    param: &'q Value,
) -> sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    match param {
        Value::Null => query.bind(Option::<i64>::None),
        Value::Integer(v) => query.bind(*v),
        Value::Real(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.as_str()),
        Value::Blob(v) => query.bind(v.as_slice()),
    }
}

fn map_rows(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<QueryResult, RosterError> {
    let columns = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut out_rows = Vec::with_capacity(rows.len());
    for row in rows {
        let mut out = Vec::with_capacity(row.columns().len());
        for idx in 0..row.columns().len() {
            out.push(map_sqlite_value(&row, idx)?);
        }
        out_rows.push(out);
    }
    Ok(QueryResult {
        rows: out_rows,
        columns,
    })
}

fn map_sqlite_value(row: &sqlx::sqlite::SqliteRow, index: usize) -> Result<Value, RosterError> {
    if row.try_get_raw(index).map_err(store_error)?.is_null() {
        return Ok(Value::Null);
    }

    if let Ok(value) = row.try_get::<i64, _>(index) {
        return Ok(Value::Integer(value));
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return Ok(Value::Real(value));
    }
    if let Ok(value) = row.try_get::<String, _>(index) {
        return Ok(Value::Text(value));
    }
    if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
        return Ok(Value::Blob(value));
    }

    Ok(Value::Null)
}
