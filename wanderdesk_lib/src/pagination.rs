//! Local pagination state of a list page.

use std::fmt;

use wanderdesk_api::types::Pagination;
use wanderdesk_api::PageQuery;

/// `{page, limit, total_pages, total_records}` as last reported by the server.
///
/// Invariants: `page >= 1`, `limit > 0`, `total_pages >= 1` and, once a fetch
/// has completed, `page <= total_pages`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    limit: u32,
    total_pages: u32,
    total_records: u64,
}

impl PaginationState {
    /// First page of an unknown-size list.
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total_pages: 1,
            total_records: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// The query for the page currently shown.
    pub fn query(&self) -> PageQuery {
        PageQuery::default()
            .with_page(self.page)
            .with_limit(self.limit)
    }

    /// Adopts what the server actually served, clamped into the invariants.
    pub fn reconcile(&mut self, served: &Pagination) {
        if served.limit > 0 {
            self.limit = served.limit;
        }
        self.total_pages = served.total_pages.max(1);
        self.page = served.page.clamp(1, self.total_pages);
        self.total_records = served.total_records;
    }

    /// Unpaginated lists are a single page holding everything.
    pub fn reconcile_unpaginated(&mut self, count: usize) {
        self.page = 1;
        self.total_pages = 1;
        self.total_records = count as u64;
    }

    /// The query to dispatch for `requested`, or `None` when it lies outside
    /// `1..=total_pages` and nothing should be fetched.
    pub fn change_page(&self, requested: i64) -> Option<PageQuery> {
        if requested < 1 || requested > i64::from(self.total_pages) {
            return None;
        }
        Some(self.query().with_page(requested as u32))
    }

    pub fn next_page(&self) -> Option<PageQuery> {
        self.change_page(i64::from(self.page) + 1)
    }

    pub fn previous_page(&self) -> Option<PageQuery> {
        self.change_page(i64::from(self.page) - 1)
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} of {}", self.page, self.total_pages)
    }
}
