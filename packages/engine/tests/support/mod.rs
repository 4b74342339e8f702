#![allow(dead_code)]

pub mod sqlite;

use roster_engine::{boot, BootArgs, CandidateInput, Engine, Value};

pub async fn boot_engine(chunk_size: usize) -> Engine {
    let engine = boot(
        BootArgs::new(Box::new(sqlite::SqliteBackend::in_memory())).with_chunk_size(chunk_size),
    );
    engine.init().await.expect("init should create the records table");
    engine
}

pub fn input(name: &str, secondary_id: &str, group_tag: Option<&str>, sensitive_id: &str) -> CandidateInput {
    CandidateInput {
        group_tag: group_tag.map(str::to_string),
        primary_name: name.to_string(),
        secondary_id: secondary_id.to_string(),
        sensitive_id: sensitive_id.to_string(),
        location: None,
        notes: None,
    }
}

pub async fn count_rows(engine: &Engine) -> i64 {
    let result = engine
        .execute("SELECT COUNT(*) FROM roster_record", &[])
        .await
        .expect("count query should succeed");
    match &result.rows[0][0] {
        Value::Integer(count) => *count,
        other => panic!("expected integer count, got {other:?}"),
    }
}

/// `(id, group_tag)` of every row for a pair, ordered by id.
pub async fn tags_for_pair(engine: &Engine, name: &str, secondary_id: &str) -> Vec<(i64, String)> {
    let result = engine
        .execute(
            "SELECT id, group_tag FROM roster_record \
             WHERE primary_name = ? AND secondary_id = ? ORDER BY id ASC",
            &[Value::text(name), Value::text(secondary_id)],
        )
        .await
        .expect("pair query should succeed");
    result
        .rows
        .iter()
        .map(|row| match (&row[0], &row[1]) {
            (Value::Integer(id), Value::Text(tag)) => (*id, tag.clone()),
            other => panic!("unexpected row shape {other:?}"),
        })
        .collect()
}

pub async fn seed_row(engine: &Engine, group_tag: &str, name: &str, secondary_id: &str, sensitive_id: &str) {
    engine
        .execute(
            "INSERT INTO roster_record (group_tag, primary_name, secondary_id, sensitive_id) \
             VALUES (?, ?, ?, ?)",
            &[
                Value::text(group_tag),
                Value::text(name),
                Value::text(secondary_id),
                Value::text(sensitive_id),
            ],
        )
        .await
        .expect("seed insert should succeed");
}
