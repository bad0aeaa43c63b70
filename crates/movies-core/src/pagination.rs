//! Pagination types for search operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed, as exposed by the API).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 50;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;
    /// The deepest page a search may ask for.
    pub const MAX_PAGE: usize = 10_000;

    /// Creates a new page request.
    ///
    /// Page numbers below 1 are clamped to the first page.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page: page.max(1),
            size: size.min(Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the `from` offset for search queries.
    ///
    /// Saturates instead of overflowing on out-of-range page numbers.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Returns the `size` limit for search queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_page_request_max_size() {
        let req = PageRequest::new(1, 1000);
        assert_eq!(req.size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_page_request_first() {
        let req = PageRequest::first();
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let req = PageRequest::new(0, 20);
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset_saturates() {
        let req = PageRequest::new(usize::MAX, PageRequest::MAX_SIZE);
        assert_eq!(req.offset(), usize::MAX);
    }
}
