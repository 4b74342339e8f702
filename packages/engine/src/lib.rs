mod backend;
mod boot;
mod engine;
mod error;
pub mod errors;
mod execute;
pub mod import;
mod init;
pub mod page;
pub mod record;
mod types;

#[cfg(test)]
mod test_support;

pub use backend::{RosterBackend, RosterTransaction};
pub use boot::{boot, BootArgs, DEFAULT_CHUNK_SIZE, MAX_BOUND_PARAMETERS, MAX_CHUNK_SIZE};
pub use engine::Engine;
pub use error::RosterError;
pub use errors::ErrorCode;
pub use execute::TransactionPhase;
pub use import::UploadSummary;
pub use init::init_backend;
pub use page::{Page, PageRequest, MIN_PAGE_SIZE};
pub use record::{Candidate, CandidateInput, CompositeKey, GroupTag, PairKey, Record};
pub use types::{QueryResult, Value};
