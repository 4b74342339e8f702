mod backend;
mod import;

use roster_engine::{boot, BootArgs, DEFAULT_CHUNK_SIZE};

pub use backend::SqliteBackend;
pub use import::parse_candidates;
pub use roster_engine::{
    Candidate, CandidateInput, Engine, ErrorCode, Page, PageRequest, QueryResult, Record,
    RosterBackend, RosterError, UploadSummary, Value,
};

/// How to open a roster. The default is an in-memory SQLite store with the
/// default chunk size.
#[derive(Default)]
pub struct OpenRosterConfig {
    pub backend: Option<Box<dyn RosterBackend + Send + Sync>>,
    pub chunk_size: Option<usize>,
}

pub struct Roster {
    engine: Engine,
}

/// Boots an engine on the configured store and makes sure the records table
/// exists.
pub async fn open_roster(config: OpenRosterConfig) -> Result<Roster, RosterError> {
    let backend: Box<dyn RosterBackend + Send + Sync> = match config.backend {
        Some(backend) => backend,
        None => Box::new(SqliteBackend::in_memory()?),
    };
    let engine = boot(
        BootArgs::new(backend).with_chunk_size(config.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)),
    );
    engine.init().await?;
    Ok(Roster { engine })
}

impl Roster {
    pub async fn upload(&self, inputs: Vec<CandidateInput>) -> Result<UploadSummary, RosterError> {
        self.engine.upload(inputs).await
    }

    pub async fn upload_candidates<I>(&self, candidates: I) -> Result<UploadSummary, RosterError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        self.engine.upload_candidates(candidates).await
    }

    /// Parses a JSON array or JSON lines document and uploads it as one batch.
    pub async fn upload_json(&self, text: &str) -> Result<UploadSummary, RosterError> {
        let inputs = parse_candidates(text)?;
        self.engine.upload(inputs).await
    }

    pub async fn list_records(&self, request: &PageRequest) -> Result<Page<Record>, RosterError> {
        self.engine.list_records(request).await
    }

    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        self.engine.execute(sql, params).await
    }

    pub fn chunk_size(&self) -> usize {
        self.engine.chunk_size()
    }
}
