//! 1-based page numbers and non-zero page sizes.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPage`] when `raw` is zero.
    pub const fn new(raw: u32) -> Result<Self, PaginationError> {
        match NonZeroU32::new(raw) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPage),
        }
    }

    /// Raw 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, or `None` on the first page.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match NonZeroU32::new(self.0.get() - 1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Whether this page lies within `1..=total_pages`.
    #[must_use]
    pub const fn is_within(self, total_pages: u32) -> bool {
        self.0.get() <= total_pages
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of records per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Page size used by the dashboard listing.
    pub const DASHBOARD: Self = match NonZeroU32::new(6) {
        Some(value) => Self(value),
        None => Self(NonZeroU32::MIN),
    };

    /// Validate and construct a page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `raw` is zero.
    pub const fn new(raw: u32) -> Result<Self, PaginationError> {
        match NonZeroU32::new(raw) {
            Some(value) => Ok(Self(value)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Raw record count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Size as a `usize`, for slicing record lists.
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0.get()).unwrap_or(usize::MAX)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DASHBOARD
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PaginationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// Number of pages needed for `total` records, `ceil(total / size)`.
///
/// Saturates at `u32::MAX`.
#[must_use]
pub fn total_pages(total: u64, size: PageSize) -> u32 {
    let pages = total.div_ceil(u64::from(size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 6, 0)]
    #[case(1, 6, 1)]
    #[case(6, 6, 1)]
    #[case(7, 6, 2)]
    #[case(12, 6, 2)]
    #[case(13, 6, 3)]
    #[case(5, 1, 5)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] size: u32, #[case] expected: u32) {
        let page_size = PageSize::new(size).expect("non-zero size");
        assert_eq!(total_pages(total, page_size), expected);
    }

    #[rstest]
    fn total_pages_saturates() {
        let single = PageSize::new(1).expect("non-zero size");
        assert_eq!(total_pages(u64::MAX, single), u32::MAX);
    }

    #[rstest]
    fn zero_values_are_rejected() {
        assert_eq!(PageNumber::new(0), Err(PaginationError::ZeroPage));
        assert_eq!(PageSize::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    fn navigation_stays_in_range() {
        assert_eq!(PageNumber::FIRST.previous(), None);
        let second = PageNumber::FIRST.next();
        assert_eq!(second.get(), 2);
        assert_eq!(second.previous(), Some(PageNumber::FIRST));
        assert!(second.is_within(2));
        assert!(!second.is_within(1));
    }

    #[rstest]
    fn serde_rejects_zero_page() {
        let parsed: Result<PageNumber, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
        let page: PageNumber = serde_json::from_str("3").expect("page three");
        assert_eq!(page.to_string(), "3");
    }
}
