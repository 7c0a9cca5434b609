//! # Pagination Helper
//!
//! Page-index/page-size state over any ordered sequence.
//!
//! The paginator does not own its input: the current slice is passed to every
//! call, so pages and counts always reflect the latest derived view. Every
//! navigation method is clamped and never fails.

use crate::export;
use crate::primitives::DEFAULT_PAGE_SIZE;
use crate::record::Fields;
use serde::{Deserialize, Serialize};

/// Zero-based page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginator over a caller-provided slice.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    state: PaginationState,
}

impl Paginator {
    /// Start on the first page. A zero `page_size` falls back to the default.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            state: PaginationState {
                page_index: 0,
                page_size,
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Items of the current page; empty when the index is past the end.
    #[must_use]
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.state.page_index.saturating_mul(self.state.page_size);
        let end = start.saturating_add(self.state.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }

    /// `ceil(len / page_size)`.
    #[must_use]
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.state.page_size)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.state.page_index > 0
    }

    #[must_use]
    pub fn has_next(&self, len: usize) -> bool {
        self.state.page_index.saturating_add(1) < self.page_count(len)
    }

    pub fn go_to_previous(&mut self) {
        if self.has_previous() {
            self.state.page_index -= 1;
        }
    }

    pub fn go_to_next(&mut self, len: usize) {
        if self.has_next(len) {
            self.state.page_index += 1;
        }
    }

    /// Jump to `page` if it exists. Returns whether it did.
    pub fn go_to_page(&mut self, page: usize, len: usize) -> bool {
        if page < self.page_count(len) {
            self.state.page_index = page;
            true
        } else {
            false
        }
    }

    /// Change the page size and restart at the first page.
    ///
    /// A zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        self.state.page_size = page_size;
        self.state.page_index = 0;
    }

    /// CSV rendering of the full input (not only the current page).
    #[must_use]
    pub fn export_csv<T: Fields>(&self, items: &[T]) -> Option<String> {
        export::to_csv(items)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_items_page_size_two() {
        let items = [1, 2, 3, 4, 5];
        let paginator = Paginator::new(2);
        assert_eq!(paginator.page(&items), &[1, 2]);
        assert_eq!(paginator.page_count(items.len()), 3);
        assert!(!paginator.has_previous());
        assert!(paginator.has_next(items.len()));
    }

    #[test]
    fn navigation_is_clamped() {
        let items = [1, 2, 3, 4, 5];
        let mut paginator = Paginator::new(2);
        paginator.go_to_previous();
        assert_eq!(paginator.state().page_index, 0);

        paginator.go_to_next(items.len());
        paginator.go_to_next(items.len());
        paginator.go_to_next(items.len());
        assert_eq!(paginator.state().page_index, 2);
        assert_eq!(paginator.page(&items), &[5]);
        assert!(!paginator.has_next(items.len()));
    }

    #[test]
    fn go_to_page_rejects_out_of_range() {
        let mut paginator = Paginator::new(2);
        assert!(paginator.go_to_page(1, 5));
        assert!(!paginator.go_to_page(3, 5));
        assert_eq!(paginator.state().page_index, 1);
        assert!(!paginator.go_to_page(0, 0));
    }

    #[test]
    fn set_page_size_resets_index() {
        let mut paginator = Paginator::new(2);
        paginator.go_to_page(2, 5);
        paginator.set_page_size(3);
        assert_eq!(
            paginator.state(),
            PaginationState {
                page_index: 0,
                page_size: 3
            }
        );
    }

    #[test]
    fn zero_page_size_is_ignored() {
        let mut paginator = Paginator::new(0);
        assert_eq!(paginator.state().page_size, DEFAULT_PAGE_SIZE);
        paginator.set_page_size(0);
        assert_eq!(paginator.state().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn shrunk_input_yields_empty_page() {
        let mut paginator = Paginator::new(2);
        paginator.go_to_page(2, 5);
        let shrunk = [1, 2];
        assert!(paginator.page(&shrunk).is_empty());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let paginator = Paginator::default();
        let empty: [u8; 0] = [];
        assert_eq!(paginator.page_count(0), 0);
        assert!(!paginator.has_next(0));
        assert!(paginator.page(&empty).is_empty());
    }
}
