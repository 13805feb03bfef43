//! Dashboard pagination and cache controller.
//!
//! Serves user pages from a local cache when possible and falls back to the
//! remote directory otherwise. Creates are applied optimistically after the
//! directory acknowledges them; updates and deletes invalidate the whole
//! cache. Every fetch is issued under a [`PageTicket`] and a response whose
//! ticket is no longer the latest is discarded.

mod cache;

use std::sync::Arc;

use pagination::{Page, PageNumber, PageRequest, PageSize, total_pages};
use tracing::{debug, error};

use super::ports::{UserDirectory, UserDirectoryError};
use super::{NewUser, User, UserId, UserPatch};

pub use cache::PageCache;

/// Handle for one outstanding page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    sequence: u64,
    request: PageRequest,
}

impl PageTicket {
    /// Request to send to the directory.
    pub fn request(self) -> PageRequest {
        self.request
    }

    /// Page this ticket was issued for.
    pub fn page(self) -> PageNumber {
        self.request.page()
    }
}

/// Result of asking for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    /// Served from the cache; the visible list is already updated.
    Cached,
    /// Not cached; fetch [`PageTicket::request`] and hand the result to
    /// [`DashboardController::apply_page`].
    Fetch(PageTicket),
}

/// What happened to a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Served from the cache without a fetch.
    Cached,
    /// Fetched, cached, and made visible.
    Fetched,
    /// A newer request superseded this one; the response was dropped.
    Stale,
}

/// Controller state for the paginated user list.
pub struct DashboardController {
    directory: Arc<dyn UserDirectory>,
    page_size: PageSize,
    cache: PageCache,
    users: Vec<User>,
    current_page: PageNumber,
    total_pages: u32,
    api_total: u64,
    loading: bool,
    form_loading: bool,
    latest_ticket: u64,
}

impl DashboardController {
    /// Controller with an empty cache positioned on page 1.
    pub fn new(directory: Arc<dyn UserDirectory>, page_size: PageSize) -> Self {
        Self {
            directory,
            page_size,
            cache: PageCache::default(),
            users: Vec::new(),
            current_page: PageNumber::FIRST,
            total_pages: 0,
            api_total: 0,
            loading: false,
            form_loading: false,
            latest_ticket: 0,
        }
    }

    /// Show `page`, from the cache when present, otherwise from the directory.
    ///
    /// On failure the error is logged and returned and the visible state is
    /// left unchanged.
    pub async fn load_page(&mut self, page: PageNumber) -> Result<PageOutcome, UserDirectoryError> {
        let ticket = match self.request_page(page) {
            PageLoad::Cached => return Ok(PageOutcome::Cached),
            PageLoad::Fetch(ticket) => ticket,
        };
        let response = self.directory.list_users(ticket.request()).await;
        self.apply_page(ticket, response)
    }

    /// First half of [`Self::load_page`]: serve from the cache or issue a ticket.
    ///
    /// Either way every earlier ticket is superseded, so a fetch still in
    /// flight for a page the user has left is discarded on arrival.
    pub fn request_page(&mut self, page: PageNumber) -> PageLoad {
        self.latest_ticket = self.latest_ticket.wrapping_add(1);
        if let Some(records) = self.cache.get(page) {
            debug!(page = page.get(), "serving page from cache");
            self.users = records.to_vec();
            self.current_page = page;
            self.loading = false;
            return PageLoad::Cached;
        }
        self.loading = true;
        PageLoad::Fetch(PageTicket {
            sequence: self.latest_ticket,
            request: PageRequest::new(page, self.page_size),
        })
    }

    /// Second half of [`Self::load_page`]: apply a fetch result.
    pub fn apply_page(
        &mut self,
        ticket: PageTicket,
        response: Result<Page<User>, UserDirectoryError>,
    ) -> Result<PageOutcome, UserDirectoryError> {
        if ticket.sequence != self.latest_ticket {
            debug!(page = ticket.page().get(), "discarding outdated page response");
            return Ok(PageOutcome::Stale);
        }
        self.loading = false;
        let page = response.inspect_err(|err| {
            error!(page = ticket.page().get(), error = %err, "failed to load users");
        })?;

        self.api_total = page.total;
        self.total_pages = total_pages(page.total, self.page_size);
        self.cache.insert(ticket.page(), page.data.clone());
        self.users = page.data;
        self.current_page = ticket.page();
        Ok(PageOutcome::Fetched)
    }

    /// Insert a new record at the head of the current page.
    ///
    /// The record gets id `api_total + 1`. Overflow beyond the page size is
    /// carried to the following pages and `total_pages` grows to cover it.
    pub fn create_local(&mut self, new_user: NewUser) -> User {
        let user = User::from_new(
            UserId::new(self.api_total.saturating_add(1)),
            new_user,
        );
        self.cache.ensure(self.current_page, &self.users);
        let last_page = self
            .cache
            .push_front(self.current_page, user.clone(), self.page_size);
        self.api_total = self.api_total.saturating_add(1);
        self.total_pages = self
            .total_pages
            .max(last_page.get())
            .max(total_pages(self.api_total, self.page_size));
        self.users = self
            .cache
            .get(self.current_page)
            .map(<[User]>::to_vec)
            .unwrap_or_default();
        user
    }

    /// Invalidate the cache after a remote update and patch the visible list.
    ///
    /// Returns the patched visible record, if the id is on the current page.
    pub fn update_local(&mut self, id: UserId, patch: &UserPatch) -> Option<User> {
        self.cache.clear();
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        user.apply(patch);
        Some(user.clone())
    }

    /// Invalidate the cache after a remote delete and drop the record from the
    /// visible list. Returns whether it was visible.
    pub fn delete_local(&mut self, id: UserId) -> bool {
        self.cache.clear();
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }

    /// Create remotely, then apply [`Self::create_local`].
    pub async fn create_user(&mut self, new_user: NewUser) -> Result<User, UserDirectoryError> {
        self.form_loading = true;
        let result = self.directory.create_user(&new_user).await;
        self.form_loading = false;
        let server_id = result.inspect_err(|err| {
            error!(error = %err, "failed to create user");
        })?;
        let user = self.create_local(new_user);
        debug!(
            local_id = %user.id,
            server_id = server_id.map(UserId::get),
            "user created"
        );
        Ok(user)
    }

    /// Update remotely, then apply [`Self::update_local`].
    ///
    /// Returns the visible record when it is on the current page, otherwise
    /// the directory's response.
    pub async fn update_user(&mut self, id: UserId, patch: UserPatch) -> Result<User, UserDirectoryError> {
        self.form_loading = true;
        let result = self.directory.update_user(id, &patch).await;
        self.form_loading = false;
        let remote = result.inspect_err(|err| {
            error!(user_id = %id, error = %err, "failed to update user");
        })?;
        Ok(self.update_local(id, &patch).unwrap_or(remote))
    }

    /// Delete remotely, then apply [`Self::delete_local`].
    pub async fn delete_user(&mut self, id: UserId) -> Result<(), UserDirectoryError> {
        self.directory.delete_user(id).await.inspect_err(|err| {
            error!(user_id = %id, error = %err, "failed to delete user");
        })?;
        let _was_visible = self.delete_local(id);
        Ok(())
    }

    /// Records on the current page.
    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    /// Page currently shown.
    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Known page count.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Last known total record count.
    pub fn api_total(&self) -> u64 {
        self.api_total
    }

    /// Records per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Whether a page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a create or update is in flight.
    pub fn is_form_loading(&self) -> bool {
        self.form_loading
    }

    /// Cached pages.
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }
}
