//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page size used when the caller asks for none (or a non-positive one).
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Largest page size served; bigger requests are capped.
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest page number served. Keeps every offset within a signed 64-bit
/// SQL parameter; larger requests are capped and simply read past the end.
pub const MAX_PAGE: u64 = i64::MAX.unsigned_abs() / MAX_PAGE_SIZE;

/// Normalized request parameters for paginated queries.
///
/// Always satisfies `1 <= page <= MAX_PAGE` and `1 <= per_page <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (1-indexed).
    page: u64,
    /// Number of items per page.
    per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Builds a page request from raw caller input.
    ///
    /// A page below 1 becomes 1 and one above [`MAX_PAGE`] is capped.
    /// A non-positive page size becomes
    /// [`DEFAULT_PAGE_SIZE`]; one above [`MAX_PAGE_SIZE`] is capped.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = u64::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .map_or(1, |p| p.min(MAX_PAGE));
        let per_page = match u64::try_from(page_size) {
            Ok(0) | Err(_) => DEFAULT_PAGE_SIZE,
            Ok(size) => size.min(MAX_PAGE_SIZE),
        };

        Self { page, per_page }
    }

    /// Builds a page request from optional query values, treating
    /// missing or unparsable values as absent.
    #[must_use]
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0);
        Self::new(parse(page), parse(page_size))
    }

    /// Returns the current page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of items in this page.
    pub count: u64,
    /// Items per page.
    pub per_page: u64,
    /// Current page number.
    pub current_page: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether pages exist after this one.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.per_page());

        Self {
            pagination: PageMeta {
                total,
                count: data.len() as u64,
                per_page: request.per_page(),
                current_page: request.page(),
                total_pages,
                has_more: request.page() < total_pages,
            },
            data,
        }
    }
}
