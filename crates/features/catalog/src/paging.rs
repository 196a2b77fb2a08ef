//! 1-based page windows over sequences.
//!
//! The same [`PageRequest`] drives both call sites: the catalog listing pushes
//! [`offset`](PageRequest::offset) and [`limit`](PageRequest::limit) down to the store, while
//! lyric text is windowed in memory with the strict bounds check of [`PageRequest::window`].

use std::ops::Range;

/// Reasons a page cannot be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page number must be at least 1")]
    ZeroPage,
    #[error("page size must be at least 1")]
    ZeroSize,
    #[error("page {page} is beyond the last page ({pages} of size {size})")]
    OutOfRange { page: u64, size: u64, pages: u64 },
}

/// A 1-based page number with its page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// `(page - 1) * size`, saturating; page 0 starts at 0.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }

    /// Number of pages a sequence of `len` items spans.
    #[must_use]
    pub const fn page_count(&self, len: u64) -> u64 {
        if self.size == 0 { 0 } else { len.div_ceil(self.size) }
    }

    /// Index range `[(page - 1) * size, min(page * size, len))` of this page.
    ///
    /// # Errors
    /// * [`PageError::ZeroPage`] / [`PageError::ZeroSize`] for a zero page or size.
    /// * [`PageError::OutOfRange`] when the page starts at or past `len`, which
    ///   includes every page of an empty sequence.
    pub fn window(&self, len: usize) -> Result<Range<usize>, PageError> {
        if self.page == 0 {
            return Err(PageError::ZeroPage);
        }
        if self.size == 0 {
            return Err(PageError::ZeroSize);
        }

        let len_u64 = len as u64;
        let out_of_range =
            PageError::OutOfRange { page: self.page, size: self.size, pages: self.page_count(len_u64) };

        let start = (self.page - 1).checked_mul(self.size).ok_or(out_of_range)?;
        if start >= len_u64 {
            return Err(out_of_range);
        }
        let end = start.saturating_add(self.size).min(len_u64);

        // Both bounds are <= len, so they fit in usize.
        Ok(usize::try_from(start).map_err(|_| out_of_range)?
            ..usize::try_from(end).map_err(|_| out_of_range)?)
    }
}

/// Borrows the page of `items` selected by `request`.
///
/// # Errors
/// See [`PageRequest::window`].
pub fn paginate<T>(items: &[T], request: PageRequest) -> Result<&[T], PageError> {
    request.window(items.len()).map(|range| &items[range])
}
