//! Client-side pagination
//!
//! Out-of-range page numbers are clamped, never rejected: a page button
//! rendered against a previous result set must still land somewhere valid.

use std::ops::Range;

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Clamp any page number into `1..=total`
pub fn clamp_page(n: i64, total: usize) -> usize {
    let total = total.max(1) as i64;
    n.clamp(1, total) as usize
}

/// Items on page `n` (1-based, clamped)
pub fn page<T>(items: &[T], n: i64, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let n = clamp_page(n, total_pages(items.len(), page_size));
    let start = ((n - 1) * page_size).min(items.len());
    let end = (n * page_size).min(items.len());
    &items[start..end]
}

/// Pagination state over a sequence of `len` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    len: usize,
    current: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            len: 0,
            current: 1,
        }
    }

    /// New sequence: back to page 1
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.current = 1;
    }

    /// Density change: keep the sequence, pull the current page into range
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current = clamp_page(self.current as i64, self.total_pages());
    }

    pub fn go_to(&mut self, n: i64) -> usize {
        self.current = clamp_page(n, self.total_pages());
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.current as i64 + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.current as i64 - 1)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.len, self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Index range of the current page
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.len);
        let end = (self.current * self.page_size).min(self.len);
        start..end
    }

    /// Current page of `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.range();
        let end = end.min(items.len());
        &items[start.min(end)..end]
    }
}
