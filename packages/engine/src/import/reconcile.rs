use std::collections::BTreeSet;

use super::dedup::DedupedBatch;
use super::resolve::ExistingRecords;
use crate::backend::RosterTransaction;
use crate::errors;
use crate::init::RECORD_TABLE;
use crate::record::{Candidate, PairKey, RECORD_WRITE_COLUMNS};
use crate::{RosterError, Value};

/// Rewrite of one placeholder row, addressed by its surrogate id, into the
/// candidate's full key and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderUpdate<'a> {
    pub row_id: i64,
    pub candidate: &'a Candidate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan<'a> {
    pub updates: Vec<PlaceholderUpdate<'a>>,
    pub claimed: BTreeSet<PairKey>,
}

/// Walks the batch in dedup order. An exact key match never consumes a
/// placeholder; otherwise the first candidate for a pair claims that pair's
/// placeholder row.
pub fn plan_reconciliation<'a>(
    batch: &'a DedupedBatch,
    existing: &ExistingRecords,
) -> ReconciliationPlan<'a> {
    let mut plan = ReconciliationPlan::default();
    for (key, candidate) in batch.iter() {
        if existing.contains_exact(key) {
            continue;
        }
        let pair = key.pair();
        if plan.claimed.contains(&pair) {
            continue;
        }
        if let Some(row_id) = existing.placeholder_id(&pair) {
            plan.updates.push(PlaceholderUpdate { row_id, candidate });
            plan.claimed.insert(pair);
        }
    }
    plan
}

/// Runs the planned updates one after another. Returns how many rows were
/// rewritten.
pub(crate) async fn apply_reconciliation(
    transaction: &mut dyn RosterTransaction,
    plan: &ReconciliationPlan<'_>,
) -> Result<usize, RosterError> {
    let assignments = RECORD_WRITE_COLUMNS
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {RECORD_TABLE} \
         SET {assignments}, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? \
         RETURNING id"
    );

    for update in &plan.updates {
        let mut params = update.candidate.write_params().to_vec();
        params.push(Value::Integer(update.row_id));
        let result = transaction.execute(&sql, &params).await?;
        if result.rows.is_empty() {
            return Err(errors::missing_placeholder_row_error(update.row_id));
        }
        tracing::debug!(
            row_id = update.row_id,
            key = %update.candidate.composite_key(),
            "absorbed placeholder row"
        );
    }
    Ok(plan.updates.len())
}
