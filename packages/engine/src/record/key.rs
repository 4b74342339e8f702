use std::fmt;

/// Storage value standing in for an absent group tag. It never leaves the
/// storage boundary: in memory an absent tag is [`GroupTag::Placeholder`].
pub const PLACEHOLDER_GROUP_TAG: &str = "empty";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupTag {
    Placeholder,
    Tagged(String),
}

impl GroupTag {
    /// Reads the optional tag of an import row. Blank values and the storage
    /// sentinel itself are treated as absent.
    pub fn from_import(value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.trim().is_empty() && value != PLACEHOLDER_GROUP_TAG => {
                Self::Tagged(value.to_string())
            }
            _ => Self::Placeholder,
        }
    }

    pub fn from_stored(value: &str) -> Self {
        if value == PLACEHOLDER_GROUP_TAG {
            Self::Placeholder
        } else {
            Self::Tagged(value.to_string())
        }
    }

    pub fn storage_value(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER_GROUP_TAG,
            Self::Tagged(value) => value.as_str(),
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::Placeholder => None,
            Self::Tagged(value) => Some(value.as_str()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// `(primary_name, secondary_id, group_tag)`: the natural key of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    pub primary_name: String,
    pub secondary_id: String,
    pub group_tag: GroupTag,
}

impl CompositeKey {
    pub fn new(
        primary_name: impl Into<String>,
        secondary_id: impl Into<String>,
        group_tag: GroupTag,
    ) -> Self {
        Self {
            primary_name: primary_name.into(),
            secondary_id: secondary_id.into(),
            group_tag,
        }
    }

    pub fn pair(&self) -> PairKey {
        PairKey::new(self.primary_name.clone(), self.secondary_id.clone())
    }

    /// Parses a `name|id|tag` token produced by `Display`.
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.splitn(3, '|');
        let primary_name = parts.next()?;
        let secondary_id = parts.next()?;
        let group_tag = parts.next()?;
        Some(Self::new(
            primary_name,
            secondary_id,
            GroupTag::from_stored(group_tag),
        ))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.primary_name,
            self.secondary_id,
            self.group_tag.storage_value()
        )
    }
}

/// `(primary_name, secondary_id)`: the part of the key shared with a
/// placeholder row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub primary_name: String,
    pub secondary_id: String,
}

impl PairKey {
    pub fn new(primary_name: impl Into<String>, secondary_id: impl Into<String>) -> Self {
        Self {
            primary_name: primary_name.into(),
            secondary_id: secondary_id.into(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.primary_name, self.secondary_id)
    }
}
