//! Page requests and their query-string encoding.

use url::Url;

use crate::{PageNumber, PageSize};

/// Page index plus page size, as sent to a paged list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PageRequest {
    page: PageNumber,
    per_page: PageSize,
}

impl PageRequest {
    /// Request `page` with `per_page` records.
    #[must_use]
    pub const fn new(page: PageNumber, per_page: PageSize) -> Self {
        Self { page, per_page }
    }

    /// Requested page.
    #[must_use]
    pub const fn page(self) -> PageNumber {
        self.page
    }

    /// Requested size.
    #[must_use]
    pub const fn per_page(self) -> PageSize {
        self.per_page
    }

    /// Same size, different page.
    #[must_use]
    pub const fn with_page(self, page: PageNumber) -> Self {
        Self { page, ..self }
    }

    /// Append `page` and `per_page` query parameters to `url`, replacing any
    /// previous values.
    pub fn apply_to(self, url: &mut Url) {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page" && key != "per_page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs
            .append_pair("page", &self.page.to_string())
            .append_pair("per_page", &self.per_page.get().to_string());
    }
}
