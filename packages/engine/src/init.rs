use crate::RosterBackend;
use crate::RosterError;

pub(crate) const RECORD_TABLE: &str = "roster_record";

// The unique constraint doubles as the lookup index for both the exact-key
// and the placeholder queries.
const INIT_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS roster_record (\
     id INTEGER PRIMARY KEY AUTOINCREMENT,\
     group_tag TEXT NOT NULL DEFAULT 'empty' CHECK (length(group_tag) <= 20),\
     primary_name TEXT NOT NULL CHECK (length(primary_name) <= 16),\
     secondary_id TEXT NOT NULL CHECK (length(secondary_id) <= 15),\
     sensitive_id TEXT NOT NULL CHECK (length(sensitive_id) <= 20),\
     location TEXT,\
     notes TEXT,\
     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,\
     updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,\
     UNIQUE (primary_name, secondary_id, group_tag)\
     )",
];

pub async fn init_backend(backend: &dyn RosterBackend) -> Result<(), RosterError> {
    for statement in INIT_STATEMENTS {
        backend.execute(statement, &[]).await?;
    }
    Ok(())
}
