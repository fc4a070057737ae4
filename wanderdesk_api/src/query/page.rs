//! Page/limit query parameters for paginated list endpoints.

use url::Url;

use crate::Error;

/// Page size used when nothing else is configured.
pub const DEFAULT_LIMIT: u32 = 10;

/// One page request: `page` is 1-indexed, `limit` is the page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    page: u32,
    limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    /// Builds a query, rejecting `page < 1` and `limit == 0`.
    pub fn new(page: u32, limit: u32) -> Result<Self, Error> {
        if page < 1 {
            return Err(Error::InvalidQuery(format!("page must be >= 1, got {}", page)));
        }
        if limit == 0 {
            return Err(Error::InvalidQuery("limit must be > 0".to_string()));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Same page size, different page. Values below 1 are raised to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Same page, different page size. Zero is raised to 1.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Appends `page` and `limit` to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string());
        url
    }
}
