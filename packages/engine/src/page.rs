use serde::{Deserialize, Serialize};

use crate::init::RECORD_TABLE;
use crate::record::{Record, RECORD_SELECT_COLUMNS};
use crate::{RosterBackend, RosterError, Value};

pub const DEFAULT_PAGE_NO: u32 = 1;
pub const MIN_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page_no")]
    pub page_no: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_no() -> u32 {
    DEFAULT_PAGE_NO
}

fn default_page_size() -> u32 {
    MIN_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_no: DEFAULT_PAGE_NO,
            page_size: MIN_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page_no: u32, page_size: u32) -> Self {
        Self { page_no, page_size }
    }

    /// Page number, floored at 1.
    pub fn page_no(&self) -> u32 {
        self.page_no.max(1)
    }

    /// Page size, floored at [`MIN_PAGE_SIZE`].
    pub fn limit(&self) -> u32 {
        self.page_size.max(MIN_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_no() - 1) * u64::from(self.limit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub limit: u32,
    pub current_page: u32,
    /// Number of items in this page.
    pub total_count: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: &PageRequest, items: Vec<T>) -> Self {
        Self {
            limit: request.limit(),
            current_page: request.page_no(),
            total_count: items.len(),
            items,
        }
    }
}

/// Records ordered by surrogate id. A page past the end is empty.
pub async fn list_records(
    backend: &dyn RosterBackend,
    request: &PageRequest,
) -> Result<Page<Record>, RosterError> {
    let sql = format!(
        "SELECT {RECORD_SELECT_COLUMNS} \
         FROM {RECORD_TABLE} \
         ORDER BY id ASC \
         LIMIT ? OFFSET ?"
    );
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    let result = backend
        .execute(
            &sql,
            &[Value::Integer(i64::from(request.limit())), Value::Integer(offset)],
        )
        .await?;
    let items = result
        .rows
        .iter()
        .map(|row| Record::from_row(row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(request, items))
}
