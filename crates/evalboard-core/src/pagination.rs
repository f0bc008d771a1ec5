//! Page slicing for filtered listings.

use serde::{Deserialize, Serialize};

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_PER_PAGE: usize = 20;

/// One page of a larger sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in sequence order.
    pub items: Vec<T>,
    /// Length of the whole sequence.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    /// `ceil(total / per_page)`; zero for an empty sequence.
    pub total_pages: usize,
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
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
    /// Zero for either parameter falls back to page 1 / [`DEFAULT_PER_PAGE`].
    pub fn new(page: usize, per_page: usize) -> Self {
        let defaults = Self::default();
        Self {
            page: if page == 0 { defaults.page } else { page },
            per_page: if per_page == 0 {
                defaults.per_page
            } else {
                per_page
            },
        }
    }
}

/// Return the `page`-th slice of `items`, `per_page` items long.
///
/// Out-of-range pages yield an empty slice, never an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let PageRequest { page, per_page } = PageRequest::new(request.page, request.per_page);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(per_page).min(total);
        items.into_iter().skip(start).take(end - start).collect()
    };

    Page {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}
