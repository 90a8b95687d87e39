//! Pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Items per page when the client sends none.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Upper bound on items per page.
pub const MAX_PER_PAGE: u32 = 100;

/// A requested page. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Builds a request from optional query values, clamping both into range.
    #[must_use]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * self.limit()
    }

    /// Rows to fetch.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page.clamp(1, MAX_PER_PAGE))
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Wraps one page of `data` out of `total` matching items.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let per_page = u32::try_from(request.limit()).unwrap_or(MAX_PER_PAGE);
        let total_pages = u32::try_from(total.div_ceil(request.limit()))
            .unwrap_or(u32::MAX)
            .max(1);

        Self {
            data,
            meta: PageMeta {
                page: request.page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 20)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(3), Some(50), 3, 50)]
    #[case(Some(2), Some(10_000), 2, MAX_PER_PAGE)]
    fn test_new_clamps(
        #[case] page: Option<u32>,
        #[case] per_page: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_per_page: u32,
    ) {
        let request = PageRequest::new(page, per_page);
        assert_eq!(request.page, expected_page);
        assert_eq!(request.per_page, expected_per_page);
    }

    #[test]
    fn test_offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(Some(1), Some(20)).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn test_limit_caps_deserialized_requests() {
        let request = PageRequest {
            page: 1,
            per_page: 5_000,
        };
        assert_eq!(request.limit(), u64::from(MAX_PER_PAGE));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(3, 1)]
    #[case(20, 2)]
    #[case(21, 3)]
    fn test_total_pages(#[case] total: u64, #[case] expected: u32) {
        let response: PageResponse<u8> =
            PageResponse::new(vec![], &PageRequest::new(Some(1), Some(10)), total);
        assert_eq!(response.meta.total_pages, expected);
        assert_eq!(response.meta.total, total);
    }
}
