//! Numbered-page envelope primitives shared by backend endpoints.
//!
//! Listings in the HTTP API page by `page`/`pageSize` query parameters and
//! return a `{list, total, page, pageSize}` envelope. This crate owns the
//! validated request type and the generic envelope so every endpoint slices
//! and labels pages the same way.

use serde::Serialize;
use thiserror::Error;

/// Page size applied when a request omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on `pageSize` accepted from clients.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// The page size is zero or exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be between 1 and {MAX_PAGE_SIZE}")]
    PageSizeOutOfRange,
}

/// Validated page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= page_size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and construct a page selection.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `page_size` falls
    /// outside `1..=MAX_PAGE_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::new(2, 25)?;
    /// assert_eq!(request.page(), 2);
    /// assert_eq!(request.page_size(), 25);
    /// # Ok::<(), pagination::PageRequestError>(())
    /// ```
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeOutOfRange);
        }
        Ok(Self { page, page_size })
    }

    /// The first page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Requested page number, starting at 1.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    fn offset(self) -> usize {
        let index = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        let size = usize::try_from(self.page_size).unwrap_or(usize::MAX);
        index.saturating_mul(size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of an ordered listing plus the pre-slice total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items belonging to the requested page, in listing order.
    pub list: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Page number this envelope was sliced for.
    pub page: u32,
    /// Page size this envelope was sliced with.
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Slice an already-filtered, already-ordered listing into one page.
    ///
    /// A page past the end of the listing yields an empty `list` while
    /// `total` still reports the full listing size.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(2, 2)?;
    /// let page = Page::from_items(vec!["a", "b", "c"], request);
    /// assert_eq!(page.list, vec!["c"]);
    /// assert_eq!(page.total, 3);
    /// # Ok::<(), pagination::PageRequestError>(())
    /// ```
    #[must_use]
    pub fn from_items(items: Vec<T>, request: PageRequest) -> Self {
        let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let size = usize::try_from(request.page_size()).unwrap_or(usize::MAX);
        let list: Vec<T> = items.into_iter().skip(request.offset()).take(size).collect();
        Self {
            list,
            total,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// Transform the paged items while preserving the envelope labels.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            list: self.list.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
