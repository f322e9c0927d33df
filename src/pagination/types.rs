//! Pagination frame types and fetch-function signatures.

use futures::future::BoxFuture;

use crate::error::Result;

/// List metadata decoded from the four pagination response headers.
///
/// `page_count` and `item_count` stay zero for simulated (non-paginated)
/// endpoints; `page` and `limit` always reflect the page just fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Page size of the fetched page.
    pub limit: u64,
    /// Page number of the fetched page, 1-based.
    pub page: u64,
    /// Total number of pages.
    pub page_count: u64,
    /// Total number of items across all pages.
    pub item_count: u64,
}

impl PageMeta {
    /// Whether pages beyond the one just fetched remain.
    pub fn has_more(&self) -> bool {
        self.page_count > self.page
    }
}

/// The result of fetching one page: decoded elements plus list metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Elements of this page, in response order.
    pub items: Vec<T>,
    /// Header-sourced list metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page from its parts.
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }
}

/// Page-fetch function driving an iterator.
///
/// Called with a snapshot of the current parameter value; one invocation
/// performs one HTTP exchange and produces one [`Page`].
pub type FetchFn<P, T> = Box<dyn Fn(P) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// Check run immediately before every page fetch, including the first.
///
/// An `Err` becomes the iterator's terminal error and suppresses the
/// network call for that page.
pub type Precondition<P> = Box<dyn Fn(&P) -> Result<()> + Send + Sync>;
