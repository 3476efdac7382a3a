//! Fixed-size pagination over a ranked list

use serde::Serialize;

/// One page of a list plus the metadata the pager displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 0-based, inclusive.
    pub start_index: usize,
    /// 0-based, exclusive.
    pub end_index: usize,
}

impl<T> Page<T> {
    /// 1-based inclusive range for "Showing 11-20 of 35"; `None` when empty.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.start_index + 1, self.end_index))
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// Total pages for `len` items; at least one, even for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice page `current_page` (1-based) out of `list`.
///
/// The page is not clamped: an out-of-range page yields no items. Callers
/// reset to page 1 whenever the upstream list changes. `page_size` must be
/// positive.
pub fn paginate<T: Clone>(list: &[T], page_size: usize, current_page: usize) -> Page<T> {
    debug_assert!(page_size > 0, "page_size must be positive");
    let page_size = page_size.max(1);

    let (start_index, end_index) = if current_page == 0 {
        (0, 0)
    } else {
        let start = (current_page - 1).saturating_mul(page_size).min(list.len());
        let end = start.saturating_add(page_size).min(list.len());
        (start, end)
    };

    Page {
        items: list[start_index..end_index].to_vec(),
        current_page,
        total_pages: total_pages(list.len(), page_size),
        total_items: list.len(),
        start_index,
        end_index,
    }
}
