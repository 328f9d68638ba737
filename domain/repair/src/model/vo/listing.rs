use serde::Serialize;

use crate::model::entity::{Client, ServiceRequest, Vehicle};

use super::RequestStatus;

pub const DEFAULT_PAGE_LIMIT: u64 = 50;
pub const MAX_PAGE_LIMIT: u64 = 100;
/// Keeps the offset far inside the range of a SQL `bigint`.
pub const MAX_PAGE: u64 = 1_000_000;

/// Staff side filter of the request list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// `None` lists every status
    pub status: Option<RequestStatus>,
    /// Substring of the request number, or of the client's first or last name ignoring case
    pub search: Option<String>,
}

impl RequestFilter {
    /// Lowercased search term, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|el| !el.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, request: &ServiceRequest, client: &Client) -> bool {
        if self.status.is_some_and(|el| el != request.status) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(term) => {
                request.request_number.contains(&term)
                    || client.first_name.to_lowercase().contains(&term)
                    || client
                        .last_name
                        .as_deref()
                        .is_some_and(|el| el.to_lowercase().contains(&term))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Starts from 1
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    /// Missing values fall back to defaults, out of range values are clamped.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl<T> PaginationResult<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
            pages: total.div_ceil(pagination.limit),
        }
    }
}

/// One row of the request list.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSummary {
    pub request: ServiceRequest,
    pub client: Client,
    pub vehicle: Vehicle,
    pub works_count: u64,
}
