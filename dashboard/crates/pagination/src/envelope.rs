//! Wire envelope for paged listings.

use serde::{Deserialize, Serialize};

use crate::{PageNumber, PageRequest, PaginationError, total_pages};

/// One page of records together with the listing totals.
///
/// Field names follow the `snake_case` wire format of paged list endpoints:
///
/// ```json
/// {"page": 2, "per_page": 6, "total": 12, "total_pages": 2, "data": []}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// 1-based index of this page.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Total records across all pages.
    pub total: u64,
    /// Total pages as reported by the producer.
    pub total_pages: u32,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Build an envelope for `request`, deriving `total_pages` from `total`.
    #[must_use]
    pub fn new(request: PageRequest, total: u64, data: Vec<T>) -> Self {
        Self {
            page: request.page().get(),
            per_page: request.per_page().get(),
            total,
            total_pages: total_pages(total, request.per_page()),
            data,
        }
    }

    /// Validated page number of this envelope.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidEnvelopePage`] when the producer
    /// reported page 0.
    pub fn page_number(&self) -> Result<PageNumber, PaginationError> {
        PageNumber::new(self.page).map_err(|_| PaginationError::InvalidEnvelopePage {
            page: u64::from(self.page),
        })
    }

    /// Transform every record, keeping the totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
