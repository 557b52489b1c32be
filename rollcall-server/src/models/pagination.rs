//! Pagination types
//!
//! Query parameters are parsed leniently: non-numeric or sub-1 values
//! fall back to the defaults rather than producing a 400. Negative
//! values take the same fallback path as garbage input; nothing a
//! client puts in `page`/`limit` can make a list request fail.

use serde::{Deserialize, Serialize};

/// Hard cap on items per page
const MAX_LIMIT: u32 = 50;

/// Default items per page
const DEFAULT_LIMIT: u32 = 20;

/// Default page (1-indexed)
const DEFAULT_PAGE: u32 = 1;

/// Validated pagination for a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (capped at 50)
    pub limit: u32,
}

impl Pagination {
    /// Build pagination, capping `limit` to 1..=50 and `page` to >= 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw query parameters as they arrive on the wire.
///
/// Kept as strings so a request like `?page=abc&limit=-3` deserializes
/// cleanly and falls back to defaults, instead of being rejected by
/// serde before the handler runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let page = lenient(params.page.as_deref(), DEFAULT_PAGE);
        let limit = lenient(params.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT);
        Self { page, limit }
    }
}

/// Parse a positive integer, falling back to `default` on anything
/// absent, non-numeric, or below 1.
fn lenient(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| (1..=u32::MAX as i64).contains(v))
        .map(|v| v as u32)
        .unwrap_or(default)
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// A page of items plus its metadata
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    /// `ceil(total / limit)`; an empty table has zero pages.
    pub fn total_pages(&self) -> i64 {
        let limit = self.limit.max(1) as i64;
        (self.total + limit - 1) / limit
    }

    /// Metadata block for the response body.
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }
}
