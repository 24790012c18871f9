use crate::pipe::{Validate, Violation};
use serde::Deserialize;

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;
/// Highest page whose offset still fits a signed 64-bit SQL `OFFSET` at
/// the largest limit.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_LIMIT;

/// 1-based page selection used by every `find_many` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Fills absent query parameters with the defaults.
    pub fn from_parts(page: Option<u64>, limit: Option<u64>) -> Self {
        Self::new(
            page.unwrap_or_else(default_page),
            limit.unwrap_or_else(default_limit),
        )
    }

    /// Saturates instead of overflowing; validated values never reach
    /// the saturation point.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(default_page(), default_limit())
    }
}

impl Validate for Pagination {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        if self.page == 0 || self.page > MAX_PAGE {
            violations.push(Violation::new(
                "page",
                format!("must be between 1 and {MAX_PAGE}"),
            ));
        }
        if self.limit == 0 || self.limit > MAX_PAGE_LIMIT {
            violations.push(Violation::new(
                "limit",
                format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            ));
        }
        Violation::into_result(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let violations = Pagination::new(0, 500).validate().unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn rejects_pages_past_the_offset_range() {
        let violations = Pagination::new(u64::MAX, MAX_PAGE_LIMIT)
            .validate()
            .unwrap_err();
        assert_eq!(violations[0].field, "page");

        assert!(Pagination::new(MAX_PAGE, MAX_PAGE_LIMIT).validate().is_ok());
        assert!(Pagination::new(MAX_PAGE, MAX_PAGE_LIMIT).offset() <= i64::MAX as u64);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        assert_eq!(Pagination::new(u64::MAX, 100).offset(), u64::MAX);
    }
}
