use roster_const::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Pagination parameters for the administrative account listing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index (default: 0)
    #[serde(default)]
    pub page: usize,

    /// Page size (default: 10, max: 100)
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Create a page request, clamping the size to the allowed range
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }.validate()
    }

    /// Validate and normalize pagination parameters
    pub fn validate(self) -> Self {
        let size = self.size.clamp(1, MAX_PAGE_SIZE);
        Self { page: self.page, size }
    }

    /// Offset of the first item on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: default_size() }
    }
}

/// Pagination metadata for responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Total number of matching items across all pages
    pub total: usize,

    /// Number of items in this page
    pub count: usize,

    /// Zero-based page index
    pub page: usize,

    /// Items per page
    pub size: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from total count
    pub fn from_total(total: usize, page: usize, size: usize, count: usize) -> Self {
        let offset = page.saturating_mul(size);
        Self {
            total,
            count,
            page,
            size,
            total_pages: total.div_ceil(size),
            has_more: offset + count < total,
        }
    }
}

/// One page of results with pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// Create a page from the sliced items and the total match count
    pub fn from_total(items: Vec<T>, total: usize, request: &PageRequest) -> Self {
        let count = items.len();
        Self {
            items,
            pagination: PaginationMeta::from_total(total, request.page, request.size, count),
        }
    }

    /// An empty page for a query that matched nothing
    pub fn empty(request: &PageRequest) -> Self {
        Self::from_total(Vec::new(), 0, request)
    }
}
