//! Batch reconciliation of import rows against the records table.
//!
//! One import is: dedup the batch, resolve what the store already holds,
//! absorb placeholder rows, then upsert the whole batch in chunks. All store
//! work after dedup runs inside a single transaction.

mod dedup;
mod reconcile;
mod resolve;
mod sql;
mod upsert;

pub use dedup::{dedup_candidates, DedupedBatch};
pub use reconcile::{plan_reconciliation, PlaceholderUpdate, ReconciliationPlan};
pub use resolve::ExistingRecords;

use serde::{Deserialize, Serialize};

use crate::execute::{ImportTransaction, TransactionPhase};
use crate::RosterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    /// Rows handed to the import, duplicates included.
    pub submitted: usize,
    /// Rows dropped because an earlier row in the batch had the same key.
    pub duplicates_dropped: usize,
    /// Rows inserted or updated by the upsert.
    pub affected: usize,
    /// Placeholder rows rewritten to a candidate's full key.
    pub placeholders_absorbed: usize,
    /// Candidates whose full key already existed and was still there when
    /// the upsert ran.
    pub existing_matched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub message: String,
}

impl UploadSummary {
    pub(crate) fn empty() -> Self {
        Self::from_counts(0, 0, &ImportCounts::default())
    }

    pub(crate) fn from_counts(
        submitted: usize,
        duplicates_dropped: usize,
        counts: &ImportCounts,
    ) -> Self {
        let affected = counts.chunk_affected.iter().sum::<usize>();
        let updated = (counts.existing_matched + counts.placeholders_absorbed).min(affected);
        Self {
            submitted,
            duplicates_dropped,
            affected,
            placeholders_absorbed: counts.placeholders_absorbed,
            existing_matched: counts.existing_matched,
            inserted: affected - updated,
            updated,
            message: format!("Imported {affected} records."),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportCounts {
    pub existing_matched: usize,
    pub placeholders_absorbed: usize,
    pub chunk_affected: Vec<usize>,
}

pub(crate) async fn run_import(
    transaction: &mut ImportTransaction<'_>,
    batch: &DedupedBatch,
    chunk_size: usize,
) -> Result<ImportCounts, RosterError> {
    transaction.enter(TransactionPhase::ResolvingExisting);
    let existing = resolve::resolve_existing(transaction.store(), batch, chunk_size).await?;

    transaction.enter(TransactionPhase::Reconciling);
    let plan = plan_reconciliation(batch, &existing);
    let existing_matched = count_existing_matches(batch, &existing, &plan);
    let placeholders_absorbed = reconcile::apply_reconciliation(transaction.store(), &plan).await?;

    transaction.enter(TransactionPhase::Upserting);
    let chunk_affected = upsert::upsert_in_chunks(transaction.store(), batch, chunk_size).await?;

    Ok(ImportCounts {
        existing_matched,
        placeholders_absorbed,
        chunk_affected,
    })
}

/// Candidates the upsert will land on an existing row. A placeholder-key
/// candidate whose row is rewritten by another candidate of the same pair
/// finds no row left and is inserted instead.
fn count_existing_matches(
    batch: &DedupedBatch,
    existing: &ExistingRecords,
    plan: &ReconciliationPlan<'_>,
) -> usize {
    batch
        .iter()
        .filter(|(key, _)| existing.contains_exact(key))
        .filter(|(key, _)| !(key.group_tag.is_placeholder() && plan.claimed.contains(&key.pair())))
        .count()
}
