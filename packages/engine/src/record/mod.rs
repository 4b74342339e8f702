mod key;
mod mask;
mod types;

pub use key::{CompositeKey, GroupTag, PairKey, PLACEHOLDER_GROUP_TAG};
pub use mask::{mask_sensitive_id, normalize_secondary_id};
pub(crate) use types::{required_text, RECORD_SELECT_COLUMNS, RECORD_WRITE_COLUMNS};
pub use types::{Candidate, CandidateInput, Record};
