//! Page numbering and paged list envelopes for the user dashboard.
//!
//! Remote user listings are 1-based and fixed-size. [`PageNumber`] and
//! [`PageSize`] make the zero cases unrepresentable, [`total_pages`] holds the
//! `ceil(total / size)` rule in one place, and [`Page`] is the wire envelope
//! returned by paged list endpoints.

mod envelope;
mod error;
mod number;
mod request;

pub use envelope::Page;
pub use error::PaginationError;
pub use number::{PageNumber, PageSize, total_pages};
pub use request::PageRequest;
