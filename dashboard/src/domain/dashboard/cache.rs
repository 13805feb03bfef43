//! Page number to record list cache.

use std::collections::BTreeMap;

use pagination::{PageNumber, PageSize};

use crate::domain::User;

/// Records last seen for each page, in display order.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<PageNumber, Vec<User>>,
}

impl PageCache {
    /// Cached records for `page`.
    pub fn get(&self, page: PageNumber) -> Option<&[User]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Whether `page` is cached.
    pub fn contains(&self, page: PageNumber) -> bool {
        self.pages.contains_key(&page)
    }

    /// Replace the records cached for `page`.
    pub fn insert(&mut self, page: PageNumber, records: Vec<User>) {
        self.pages.insert(page, records);
    }

    /// Seed `page` with `records` unless it is already cached.
    pub fn ensure(&mut self, page: PageNumber, records: &[User]) {
        self.pages
            .entry(page)
            .or_insert_with(|| records.to_vec());
    }

    /// Drop every cached page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Insert `record` at the head of `page`.
    ///
    /// When a page grows beyond `size`, its last record moves to the head of
    /// the following page, repeating until a page has room. A page missing
    /// from the cache is created holding only the carried record. Returns the
    /// last page that received a record.
    pub fn push_front(&mut self, page: PageNumber, record: User, size: PageSize) -> PageNumber {
        let mut target = page;
        let mut carried = record;
        loop {
            let records = self.pages.entry(target).or_default();
            records.insert(0, carried);
            if records.len() <= size.as_usize() {
                return target;
            }
            let Some(overflow) = records.pop() else {
                return target;
            };
            let next = target.next();
            if next == target {
                return target;
            }
            carried = overflow;
            target = next;
        }
    }
}
