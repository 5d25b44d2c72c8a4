//! This module defines the common functionality for paging data.

/// The number of categories returned per page by the category list API.
pub const CATEGORY_PAGE_SIZE: u64 = 3;

/// The config that controls how list endpoints page their data.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of records to return per page.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: CATEGORY_PAGE_SIZE,
        }
    }
}
