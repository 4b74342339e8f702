use roster_rs_sdk::{RosterBackend, SqliteBackend, Value};

async fn backend_with_table() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("in-memory backend should initialize");
    backend
        .execute(
            "CREATE TABLE tx_test (id TEXT PRIMARY KEY, payload BLOB NOT NULL)",
            &[],
        )
        .await
        .expect("schema setup should succeed");
    backend
}

async fn count(backend: &SqliteBackend, id: &str) -> Value {
    let rows = backend
        .execute(
            "SELECT COUNT(*) FROM tx_test WHERE id = ?",
            &[Value::Text(id.to_string())],
        )
        .await
        .expect("verification query should succeed");
    rows.rows[0][0].clone()
}

#[tokio::test]
async fn sqlite_backend_transaction_commit_persists_changes() {
    let backend = backend_with_table().await;

    let mut tx = backend
        .begin_transaction()
        .await
        .expect("begin_transaction should succeed");
    tx.execute(
        "INSERT INTO tx_test (id, payload) VALUES (?, ?)",
        &[
            Value::Text("commit-row".to_string()),
            Value::Blob(vec![1, 2, 3]),
        ],
    )
    .await
    .expect("insert inside transaction should succeed");
    tx.commit().await.expect("commit should succeed");

    assert_eq!(count(&backend, "commit-row").await, Value::Integer(1));
}

#[tokio::test]
async fn sqlite_backend_transaction_rollback_discards_changes() {
    let backend = backend_with_table().await;

    let mut tx = backend
        .begin_transaction()
        .await
        .expect("begin_transaction should succeed");
    tx.execute(
        "INSERT INTO tx_test (id, payload) VALUES ('rollback-row', X'AA')",
        &[],
    )
    .await
    .expect("insert inside transaction should succeed");
    tx.rollback().await.expect("rollback should succeed");

    assert_eq!(count(&backend, "rollback-row").await, Value::Integer(0));
}

#[tokio::test]
async fn dropped_transaction_rolls_back_and_releases_the_connection() {
    let backend = backend_with_table().await;

    {
        let mut tx = backend
            .begin_transaction()
            .await
            .expect("begin_transaction should succeed");
        tx.execute(
            "INSERT INTO tx_test (id, payload) VALUES ('dropped-row', X'AA')",
            &[],
        )
        .await
        .expect("insert inside transaction should succeed");
    }

    assert_eq!(count(&backend, "dropped-row").await, Value::Integer(0));
    let tx = backend
        .begin_transaction()
        .await
        .expect("connection should be free again");
    tx.rollback().await.expect("rollback should succeed");
}

#[tokio::test]
async fn statement_errors_carry_the_store_failure_code() {
    let backend = backend_with_table().await;

    let error = backend
        .execute("SELECT * FROM missing_table", &[])
        .await
        .expect_err("unknown table should fail");

    assert_eq!(error.code, "ROSTER_ERROR_STORE_FAILURE");
    assert!(error.description.contains("missing_table"));
}

#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("people.roster");

    {
        let backend = SqliteBackend::from_path(&path).expect("file backend should open");
        backend
            .execute(
                "CREATE TABLE tx_test (id TEXT PRIMARY KEY, payload BLOB NOT NULL)",
                &[],
            )
            .await
            .expect("schema setup should succeed");
        backend
            .execute("INSERT INTO tx_test (id, payload) VALUES ('kept', X'01')", &[])
            .await
            .expect("insert should succeed");
    }

    let reopened = SqliteBackend::from_path(&path).expect("file backend should reopen");
    assert_eq!(count(&reopened, "kept").await, Value::Integer(1));
}

#[tokio::test]
async fn failed_commit_rolls_back_and_frees_the_connection() {
    let backend = SqliteBackend::in_memory().expect("in-memory backend should initialize");
    backend
        .execute("PRAGMA foreign_keys = ON", &[])
        .await
        .expect("pragma should succeed");
    backend
        .execute("CREATE TABLE parent (id INTEGER PRIMARY KEY)", &[])
        .await
        .expect("parent table should be created");
    backend
        .execute(
            "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER \
             REFERENCES parent(id) DEFERRABLE INITIALLY DEFERRED)",
            &[],
        )
        .await
        .expect("child table should be created");

    let mut tx = backend
        .begin_transaction()
        .await
        .expect("begin_transaction should succeed");
    tx.execute("INSERT INTO child (id, parent_id) VALUES (1, 99)", &[])
        .await
        .expect("deferred check lets the insert through");
    let error = tx
        .commit()
        .await
        .expect_err("deferred foreign key check fails the commit");
    assert_eq!(error.code, "ROSTER_ERROR_STORE_FAILURE");

    let rows = backend
        .execute("SELECT COUNT(*) FROM child", &[])
        .await
        .expect("count should succeed");
    assert_eq!(rows.rows[0][0], Value::Integer(0));
    let tx = backend
        .begin_transaction()
        .await
        .expect("no transaction should be left open");
    tx.rollback().await.expect("rollback should succeed");
}
