//! Errors raised when constructing page primitives.

use thiserror::Error;

/// Invalid page number or size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers start at 1.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The envelope reported a page outside the `u32` range or below 1.
    #[error("page {page} is not a valid page number")]
    InvalidEnvelopePage {
        /// Raw page value received.
        page: u64,
    },
}
