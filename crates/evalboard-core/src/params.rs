//! Lenient parsing of raw case-listing request parameters.
//!
//! Callers pass parameters exactly as received (query-string values, CLI
//! flags). Anything unparseable is treated as not supplied.

use serde::{Deserialize, Serialize};

use crate::pagination::{PageRequest, DEFAULT_PER_PAGE};
use crate::query::DetailFilter;

/// Raw parameters of a case listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseQuery {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dataset: Option<String>,
    /// `"true"` or `"false"`; anything else means no correctness filter.
    #[serde(default)]
    pub correct_only: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub question_contains: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
}

impl CaseQuery {
    /// The filter these parameters describe.
    pub fn filter(&self) -> DetailFilter {
        DetailFilter {
            model: non_empty(&self.model),
            dataset: non_empty(&self.dataset),
            correct: match self.correct_only.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
            level: self
                .difficulty_level
                .as_deref()
                .and_then(|l| l.trim().parse().ok()),
            question_contains: non_empty(&self.question_contains),
        }
    }

    /// Pagination with the crate's default page size.
    pub fn page_request(&self) -> PageRequest {
        self.page_request_with_default(DEFAULT_PER_PAGE)
    }

    /// Pagination, using `default_per_page` when `per_page` is missing or
    /// invalid. Pages and page sizes below 1 count as invalid.
    pub fn page_request_with_default(&self, default_per_page: usize) -> PageRequest {
        PageRequest {
            page: positive(&self.page).unwrap_or(1),
            per_page: positive(&self.per_page)
                .or_else(|| (default_per_page > 0).then_some(default_per_page))
                .unwrap_or(DEFAULT_PER_PAGE),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn positive(value: &Option<String>) -> Option<usize> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
}
