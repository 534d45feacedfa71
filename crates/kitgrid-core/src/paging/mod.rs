//! Page derivation over a filtered record sequence.
//!
//! A page is never stored: the visible slice is recomputed from
//! `(sequence, page_size, page_index)` on every render. Page indices are
//! 1-based and an out-of-range index yields an empty slice.

use std::ops::Range;

/// Position of the visible page within a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_size: usize,
    pub page_index: usize,
}

impl PageWindow {
    pub fn new(page_size: usize, page_index: usize) -> Self {
        Self {
            page_size,
            page_index,
        }
    }

    /// The first page for the given page size.
    pub fn first(page_size: usize) -> Self {
        Self::new(page_size, 1)
    }

    /// Half-open index range of this page, clamped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        if self.page_size == 0 || self.page_index == 0 {
            return 0..0;
        }
        let start = (self.page_index - 1).saturating_mul(self.page_size);
        if start >= len {
            return 0..0;
        }
        let end = self.page_index.saturating_mul(self.page_size).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, sequence: &'a [T]) -> &'a [T] {
        &sequence[self.range(sequence.len())]
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Back to page 1. Called whenever the upstream sequence changes.
    pub fn reset(&mut self) {
        self.page_index = 1;
    }

    pub fn go_to(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Advances one page unless already on the last page of `len` items.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page_index < self.total_pages(len) {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.page_index > 1 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }
}

/// The records visible on `page_index` (1-based).
pub fn page<T>(sequence: &[T], page_size: usize, page_index: usize) -> &[T] {
    PageWindow::new(page_size, page_index).slice(sequence)
}

/// `ceil(len / page_size)`, never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}
