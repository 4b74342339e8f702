use roster_engine::errors::invalid_import_error;
use roster_engine::{CandidateInput, RosterError};

/// Reads import rows from either a JSON array or JSON lines (one object per
/// line, blank lines ignored).
pub fn parse_candidates(text: &str) -> Result<Vec<CandidateInput>, RosterError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|err| invalid_import_error(format!("invalid JSON array: {err}")));
    }

    let mut candidates = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let candidate = serde_json::from_str::<CandidateInput>(line)
            .map_err(|err| invalid_import_error(format!("line {}: {err}", index + 1)))?;
        candidates.push(candidate);
    }
    Ok(candidates)
}
