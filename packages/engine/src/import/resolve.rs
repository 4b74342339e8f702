use std::collections::{BTreeMap, BTreeSet};

use super::dedup::DedupedBatch;
use super::sql::value_rows;
use crate::backend::RosterTransaction;
use crate::errors;
use crate::init::RECORD_TABLE;
use crate::record::{required_text, CompositeKey, GroupTag, PairKey, PLACEHOLDER_GROUP_TAG};
use crate::{RosterError, Value};

/// What the store already holds for a batch. Built once per import and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingRecords {
    exact: BTreeSet<CompositeKey>,
    placeholders: BTreeMap<PairKey, i64>,
}

impl ExistingRecords {
    pub fn new(exact: BTreeSet<CompositeKey>, placeholders: BTreeMap<PairKey, i64>) -> Self {
        Self {
            exact,
            placeholders,
        }
    }

    pub fn contains_exact(&self, key: &CompositeKey) -> bool {
        self.exact.contains(key)
    }

    pub fn placeholder_id(&self, pair: &PairKey) -> Option<i64> {
        self.placeholders.get(pair).copied()
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    pub fn placeholder_len(&self) -> usize {
        self.placeholders.len()
    }
}

pub(crate) async fn resolve_existing(
    transaction: &mut dyn RosterTransaction,
    batch: &DedupedBatch,
    chunk_size: usize,
) -> Result<ExistingRecords, RosterError> {
    let keys = batch.iter().map(|(key, _)| key).collect::<Vec<_>>();
    let exact = find_exact_matches(transaction, &keys, chunk_size).await?;

    let pairs = keys
        .iter()
        .map(|key| key.pair())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let placeholders = find_placeholders(transaction, &pairs, chunk_size).await?;

    tracing::debug!(
        candidates = keys.len(),
        exact_matches = exact.len(),
        placeholders = placeholders.len(),
        "resolved existing records"
    );
    Ok(ExistingRecords::new(exact, placeholders))
}

async fn find_exact_matches(
    transaction: &mut dyn RosterTransaction,
    keys: &[&CompositeKey],
    chunk_size: usize,
) -> Result<BTreeSet<CompositeKey>, RosterError> {
    let mut found = BTreeSet::new();
    for chunk in keys.chunks(chunk_size) {
        let sql = format!(
            "SELECT primary_name, secondary_id, group_tag \
             FROM {RECORD_TABLE} \
             WHERE (primary_name, secondary_id, group_tag) IN (VALUES {})",
            value_rows(chunk.len(), 3)
        );
        let mut params = Vec::with_capacity(chunk.len() * 3);
        for key in chunk {
            params.push(Value::text(key.primary_name.as_str()));
            params.push(Value::text(key.secondary_id.as_str()));
            params.push(Value::text(key.group_tag.storage_value()));
        }

        let result = transaction.execute(&sql, &params).await?;
        for row in &result.rows {
            let [primary_name, secondary_id, group_tag] = row.as_slice() else {
                return Err(errors::malformed_row_error(
                    "exact match row",
                    &format!("expected 3 columns, got {}", row.len()),
                ));
            };
            found.insert(CompositeKey::new(
                required_text(primary_name, "primary_name")?,
                required_text(secondary_id, "secondary_id")?,
                GroupTag::from_stored(required_text(group_tag, "group_tag")?),
            ));
        }
    }
    Ok(found)
}

async fn find_placeholders(
    transaction: &mut dyn RosterTransaction,
    pairs: &[PairKey],
    chunk_size: usize,
) -> Result<BTreeMap<PairKey, i64>, RosterError> {
    let mut found = BTreeMap::new();
    for chunk in pairs.chunks(chunk_size) {
        let sql = format!(
            "SELECT id, primary_name, secondary_id \
             FROM {RECORD_TABLE} \
             WHERE group_tag = ? \
               AND (primary_name, secondary_id) IN (VALUES {}) \
             ORDER BY id ASC",
            value_rows(chunk.len(), 2)
        );
        let mut params = Vec::with_capacity(chunk.len() * 2 + 1);
        params.push(Value::text(PLACEHOLDER_GROUP_TAG));
        for pair in chunk {
            params.push(Value::text(pair.primary_name.as_str()));
            params.push(Value::text(pair.secondary_id.as_str()));
        }

        let result = transaction.execute(&sql, &params).await?;
        for row in &result.rows {
            let [id, primary_name, secondary_id] = row.as_slice() else {
                return Err(errors::malformed_row_error(
                    "placeholder row",
                    &format!("expected 3 columns, got {}", row.len()),
                ));
            };
            let id = id
                .as_i64()
                .ok_or_else(|| errors::malformed_row_error("placeholder id", &format!("{id:?}")))?;
            let pair = PairKey::new(
                required_text(primary_name, "primary_name")?,
                required_text(secondary_id, "secondary_id")?,
            );
            if let Some(previous) = found.get(&pair) {
                return Err(errors::duplicate_placeholder_error(
                    &pair.primary_name,
                    &pair.secondary_id,
                    (*previous, id),
                ));
            }
            found.insert(pair, id);
        }
    }
    Ok(found)
}
