use crate::boot::{BootArgs, MAX_CHUNK_SIZE};
use crate::execute::run_in_transaction;
use crate::import::{dedup_candidates, run_import, DedupedBatch, UploadSummary};
use crate::init::init_backend;
use crate::page::{list_records, Page, PageRequest};
use crate::record::{Candidate, CandidateInput, Record};
use crate::{QueryResult, RosterBackend, RosterError, Value};

pub struct Engine {
    backend: Box<dyn RosterBackend + Send + Sync>,
    chunk_size: usize,
}

impl Engine {
    pub(crate) fn from_boot_args(args: BootArgs) -> Self {
        let chunk_size = args.chunk_size.clamp(1, MAX_CHUNK_SIZE);
        if chunk_size != args.chunk_size {
            tracing::warn!(
                requested = args.chunk_size,
                chunk_size,
                "chunk size out of range, clamped"
            );
        }
        Self {
            backend: args.backend,
            chunk_size,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Creates the records table if it does not exist yet.
    pub async fn init(&self) -> Result<(), RosterError> {
        init_backend(self.backend.as_ref()).await
    }

    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, RosterError> {
        self.backend.execute(sql, params).await
    }

    /// Reconciles a batch of validated import rows with the store.
    ///
    /// Either every row of the batch is applied or, on any failure, nothing
    /// is; failures surface as `ROSTER_ERROR_BULK_IMPORT_FAILED`.
    pub async fn upload(&self, inputs: Vec<CandidateInput>) -> Result<UploadSummary, RosterError> {
        self.upload_candidates(inputs.into_iter().map(Candidate::from_input))
            .await
    }

    pub async fn upload_candidates<I>(&self, candidates: I) -> Result<UploadSummary, RosterError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let batch = dedup_candidates(candidates);
        self.upload_batch(batch).await
    }

    async fn upload_batch(&self, batch: DedupedBatch) -> Result<UploadSummary, RosterError> {
        let submitted = batch.submitted();
        let duplicates_dropped = batch.duplicates_dropped();
        if batch.is_empty() {
            return Ok(UploadSummary {
                submitted,
                duplicates_dropped,
                ..UploadSummary::empty()
            });
        }

        let chunk_size = self.chunk_size;
        let counts = run_in_transaction(self.backend.as_ref(), move |transaction| {
            Box::pin(async move { run_import(transaction, &batch, chunk_size).await })
        })
        .await?;

        let summary = UploadSummary::from_counts(submitted, duplicates_dropped, &counts);
        tracing::info!(
            submitted = summary.submitted,
            duplicates_dropped = summary.duplicates_dropped,
            affected = summary.affected,
            inserted = summary.inserted,
            updated = summary.updated,
            placeholders_absorbed = summary.placeholders_absorbed,
            "import committed"
        );
        Ok(summary)
    }

    pub async fn list_records(&self, request: &PageRequest) -> Result<Page<Record>, RosterError> {
        list_records(self.backend.as_ref(), request).await
    }
}
