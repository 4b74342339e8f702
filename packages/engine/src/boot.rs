use crate::engine::Engine;
use crate::record::RECORD_WRITE_COLUMNS;
use crate::RosterBackend;

pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Bound parameters SQLite accepts in one statement.
pub const MAX_BOUND_PARAMETERS: usize = 32766;

/// Largest chunk whose upsert stays within [`MAX_BOUND_PARAMETERS`].
pub const MAX_CHUNK_SIZE: usize = MAX_BOUND_PARAMETERS / RECORD_WRITE_COLUMNS.len();

pub struct BootArgs {
    pub backend: Box<dyn RosterBackend + Send + Sync>,
    /// Rows per upsert statement and per lookup query. Zero is read as one,
    /// anything above [`MAX_CHUNK_SIZE`] as [`MAX_CHUNK_SIZE`].
    pub chunk_size: usize,
}

impl BootArgs {
    pub fn new(backend: Box<dyn RosterBackend + Send + Sync>) -> Self {
        Self {
            backend,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

pub fn boot(args: BootArgs) -> Engine {
    Engine::from_boot_args(args)
}
