use crate::RosterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    StoreFailure,
    StoreUnavailable,
    InvariantViolation,
    BulkImportFailed,
    InvalidImport,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StoreFailure => "ROSTER_ERROR_STORE_FAILURE",
            Self::StoreUnavailable => "ROSTER_ERROR_STORE_UNAVAILABLE",
            Self::InvariantViolation => "ROSTER_ERROR_INVARIANT_VIOLATION",
            Self::BulkImportFailed => "ROSTER_ERROR_BULK_IMPORT_FAILED",
            Self::InvalidImport => "ROSTER_ERROR_INVALID_IMPORT",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::StoreFailure,
            Self::StoreUnavailable,
            Self::InvariantViolation,
            Self::BulkImportFailed,
            Self::InvalidImport,
        ]
    }
}

fn build_error(code: ErrorCode, title: &str, description: &str) -> RosterError {
    RosterError::new(code.as_str(), title, description)
}

pub fn store_failure_error(description: impl std::fmt::Display) -> RosterError {
    build_error(
        ErrorCode::StoreFailure,
        "Store failure",
        &description.to_string(),
    )
}

pub fn store_unavailable_error(description: impl std::fmt::Display) -> RosterError {
    build_error(
        ErrorCode::StoreUnavailable,
        "Store unavailable",
        &description.to_string(),
    )
}

pub(crate) fn duplicate_placeholder_error(
    primary_name: &str,
    secondary_id: &str,
    row_ids: (i64, i64),
) -> RosterError {
    build_error(
        ErrorCode::InvariantViolation,
        "Duplicate placeholder rows",
        &format!(
            "rows {} and {} both hold the placeholder group tag for `{primary_name}` / `{secondary_id}`",
            row_ids.0, row_ids.1
        ),
    )
}

pub(crate) fn missing_placeholder_row_error(row_id: i64) -> RosterError {
    build_error(
        ErrorCode::InvariantViolation,
        "Placeholder row vanished",
        &format!("placeholder row {row_id} was not found while reconciling it"),
    )
}

pub(crate) fn malformed_row_error(context: &str, detail: &str) -> RosterError {
    build_error(
        ErrorCode::StoreFailure,
        "Malformed row",
        &format!("{context}: {detail}"),
    )
}

/// An import document that could not be read into rows. Raised before any
/// store work starts.
pub fn invalid_import_error(detail: impl std::fmt::Display) -> RosterError {
    build_error(
        ErrorCode::InvalidImport,
        "Invalid import",
        &detail.to_string(),
    )
}

/// The only error an aborted import surfaces. Internal causes are logged,
/// never carried in this description.
pub fn bulk_import_failed_error() -> RosterError {
    build_error(
        ErrorCode::BulkImportFailed,
        "Bulk import failed",
        "The import could not be completed. No records were changed.",
    )
}
