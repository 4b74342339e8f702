use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::record::{Candidate, CompositeKey};

/// A submission collapsed to one candidate per composite key, in first-seen
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupedBatch {
    entries: IndexMap<CompositeKey, Candidate>,
    submitted: usize,
}

impl DedupedBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.submitted - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompositeKey, &Candidate)> {
        self.entries.iter()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    pub fn get(&self, key: &CompositeKey) -> Option<&Candidate> {
        self.entries.get(key)
    }
}

/// Keeps the first candidate for each composite key; later ones are dropped
/// without error.
pub fn dedup_candidates<I>(candidates: I) -> DedupedBatch
where
    I: IntoIterator<Item = Candidate>,
{
    let mut entries = IndexMap::new();
    let mut submitted = 0usize;
    for candidate in candidates {
        submitted += 1;
        if let Entry::Vacant(slot) = entries.entry(candidate.composite_key()) {
            slot.insert(candidate);
        }
    }
    DedupedBatch { entries, submitted }
}
