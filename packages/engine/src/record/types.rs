use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::key::{CompositeKey, GroupTag, PairKey};
use super::mask::{mask_sensitive_id, normalize_secondary_id};
use crate::errors;
use crate::{RosterError, Value};

const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One already-validated import row, as handed over by the upstream parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInput {
    #[serde(default)]
    pub group_tag: Option<String>,
    pub primary_name: String,
    pub secondary_id: String,
    pub sensitive_id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An import row in storage shape: secondary id normalized, sensitive id
/// masked, group tag explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub group_tag: GroupTag,
    pub primary_name: String,
    pub secondary_id: String,
    pub sensitive_id: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Candidate {
    pub fn from_input(input: CandidateInput) -> Self {
        Self {
            group_tag: GroupTag::from_import(input.group_tag.as_deref()),
            secondary_id: normalize_secondary_id(&input.secondary_id),
            sensitive_id: mask_sensitive_id(&input.sensitive_id),
            primary_name: input.primary_name,
            location: input.location,
            notes: input.notes,
        }
    }

    pub fn composite_key(&self) -> CompositeKey {
        CompositeKey::new(
            self.primary_name.clone(),
            self.secondary_id.clone(),
            self.group_tag.clone(),
        )
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.primary_name.clone(), self.secondary_id.clone())
    }

    /// Column values in [`RECORD_WRITE_COLUMNS`] order.
    pub(crate) fn write_params(&self) -> [Value; 6] {
        [
            Value::text(self.group_tag.storage_value()),
            Value::text(self.primary_name.as_str()),
            Value::text(self.secondary_id.as_str()),
            Value::text(self.sensitive_id.as_str()),
            Value::optional_text(self.location.as_deref()),
            Value::optional_text(self.notes.as_deref()),
        ]
    }
}

impl From<CandidateInput> for Candidate {
    fn from(input: CandidateInput) -> Self {
        Self::from_input(input)
    }
}

pub(crate) const RECORD_WRITE_COLUMNS: &[&str] = &[
    "group_tag",
    "primary_name",
    "secondary_id",
    "sensitive_id",
    "location",
    "notes",
];

pub(crate) const RECORD_SELECT_COLUMNS: &str = "id, group_tag, primary_name, secondary_id, \
     sensitive_id, location, notes, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub group_tag: Option<String>,
    pub primary_name: String,
    pub secondary_id: String,
    pub sensitive_id: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record {
    /// Decodes a row selected with [`RECORD_SELECT_COLUMNS`].
    pub(crate) fn from_row(row: &[Value]) -> Result<Self, RosterError> {
        if row.len() != 9 {
            return Err(errors::malformed_row_error(
                "record row",
                &format!("expected 9 columns, got {}", row.len()),
            ));
        }
        let id = row[0]
            .as_i64()
            .ok_or_else(|| errors::malformed_row_error("record id", &format!("{:?}", row[0])))?;
        let group_tag = GroupTag::from_stored(required_text(&row[1], "group_tag")?);
        Ok(Self {
            id,
            group_tag: group_tag.as_option().map(str::to_string),
            primary_name: required_text(&row[2], "primary_name")?.to_string(),
            secondary_id: required_text(&row[3], "secondary_id")?.to_string(),
            sensitive_id: required_text(&row[4], "sensitive_id")?.to_string(),
            location: row[5].as_text().map(str::to_string),
            notes: row[6].as_text().map(str::to_string),
            created_at: parse_store_timestamp(&row[7], "created_at")?,
            updated_at: parse_store_timestamp(&row[8], "updated_at")?,
        })
    }

    pub fn composite_key(&self) -> CompositeKey {
        CompositeKey::new(
            self.primary_name.clone(),
            self.secondary_id.clone(),
            GroupTag::from_import(self.group_tag.as_deref()),
        )
    }
}

pub(crate) fn required_text<'a>(value: &'a Value, column: &str) -> Result<&'a str, RosterError> {
    value
        .as_text()
        .ok_or_else(|| errors::malformed_row_error(column, &format!("expected text, got {value:?}")))
}

fn parse_store_timestamp(value: &Value, column: &str) -> Result<NaiveDateTime, RosterError> {
    let text = required_text(value, column)?;
    NaiveDateTime::parse_from_str(text, STORE_TIMESTAMP_FORMAT)
        .map_err(|error| errors::malformed_row_error(column, &format!("{text}: {error}")))
}
