use super::dedup::DedupedBatch;
use super::sql::value_rows;
use crate::backend::RosterTransaction;
use crate::init::RECORD_TABLE;
use crate::record::RECORD_WRITE_COLUMNS;
use crate::{RosterError, Value};

/// Columns an existing row takes from a conflicting insert. Key columns and
/// the surrogate id are never overwritten.
const PAYLOAD_COLUMNS: &[&str] = &["sensitive_id", "location", "notes"];

pub(crate) fn upsert_sql(row_count: usize) -> String {
    let updates = PAYLOAD_COLUMNS
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {RECORD_TABLE} ({columns}) \
         VALUES {values} \
         ON CONFLICT (primary_name, secondary_id, group_tag) DO UPDATE SET \
         {updates}, updated_at = CURRENT_TIMESTAMP \
         RETURNING id",
        columns = RECORD_WRITE_COLUMNS.join(", "),
        values = value_rows(row_count, RECORD_WRITE_COLUMNS.len()),
    )
}

/// Writes the whole batch in chunks of `chunk_size`, one statement per chunk,
/// strictly in sequence on the given transaction. Returns the number of rows
/// each chunk inserted or updated.
pub(crate) async fn upsert_in_chunks(
    transaction: &mut dyn RosterTransaction,
    batch: &DedupedBatch,
    chunk_size: usize,
) -> Result<Vec<usize>, RosterError> {
    let candidates = batch.candidates().collect::<Vec<_>>();
    let mut affected = Vec::with_capacity(candidates.len().div_ceil(chunk_size));
    for (index, chunk) in candidates.chunks(chunk_size).enumerate() {
        let sql = upsert_sql(chunk.len());
        let params = chunk
            .iter()
            .flat_map(|candidate| candidate.write_params())
            .collect::<Vec<Value>>();

        let result = transaction.execute(&sql, &params).await?;
        tracing::debug!(
            chunk = index,
            rows = chunk.len(),
            affected = result.rows.len(),
            "upserted chunk"
        );
        affected.push(result.rows.len());
    }
    Ok(affected)
}
