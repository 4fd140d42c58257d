//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Page selection, reusable across list endpoints. Missing fields fall
/// back to the configured defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationParams {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Page size clamped to the allowed range.
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Page index as the store counts it (0-based).
    pub fn zero_based_page(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

/// A page of results with its placement metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap one page of data with metadata derived from the request
    /// parameters and the total match count.
    pub fn from_page(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let per_page = params.limit();
        Self {
            data,
            meta: PaginationMeta {
                page: params.page,
                per_page,
                total,
                total_pages: total.div_ceil(per_page),
            },
        }
    }
}
