mod sqlite;

pub use sqlite::SqliteBackend;
