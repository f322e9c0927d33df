//! Iterator strategy implementations.

use std::collections::VecDeque;

use futures::stream::Stream;

use super::types::{FetchFn, Page, PageMeta, Precondition};
use crate::error::{Error, Result};
use crate::params::ListParams;

// ============================================================================
// Single-page primitive
// ============================================================================

/// Buffer of not-yet-yielded elements for the active page.
///
/// Popping never triggers a fetch by itself; the wrapping strategy decides
/// when another page is loaded. A fetch error (or precondition error) is
/// recorded once and the buffer is never refilled afterwards.
struct PageBuffer<P, T> {
    params: P,
    fetch: FetchFn<P, T>,
    precondition: Option<Precondition<P>>,
    buffer: VecDeque<T>,
    error: Option<Error>,
}

impl<P: Clone, T> PageBuffer<P, T> {
    fn new(params: P, fetch: FetchFn<P, T>, precondition: Option<Precondition<P>>) -> Self {
        Self {
            params,
            fetch,
            precondition,
            buffer: VecDeque::new(),
            error: None,
        }
    }

    fn pop(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    /// Fetch one page with the current parameter snapshot, replacing the
    /// buffer with the page's items. Records the terminal error on failure.
    async fn fetch_page(&mut self) -> Result<PageMeta> {
        if let Some(check) = &self.precondition {
            if let Err(err) = check(&self.params) {
                self.error = Some(err.clone());
                return Err(err);
            }
        }

        match (self.fetch)(self.params.clone()).await {
            Ok(Page { items, meta }) => {
                self.buffer = items.into();
                Ok(meta)
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

// ============================================================================
// Multi-page iterator
// ============================================================================

/// Cursor over a paginated list endpoint.
///
/// Construction eagerly fetches page 1. When the buffer drains and the
/// last-fetched metadata reports more pages, the parameter value is
/// re-targeted at the next page (same limit) and one more page is fetched.
/// Pages load strictly in increasing page order, one at a time.
pub struct PagedIterator<P, T> {
    inner: PageBuffer<P, T>,
    meta: PageMeta,
}

impl<P, T> PagedIterator<P, T>
where
    P: ListParams,
{
    pub(crate) async fn new(
        params: P,
        fetch: FetchFn<P, T>,
        precondition: Option<Precondition<P>>,
    ) -> Self {
        let mut inner = PageBuffer::new(params, fetch, precondition);
        let meta = inner.fetch_page().await.unwrap_or_default();
        Self { inner, meta }
    }

    /// Yield the next element, fetching the next page on demand.
    ///
    /// A terminal error is sticky: every subsequent call returns it again
    /// and no further pages are fetched. `Ok(None)` means exhausted.
    pub async fn try_next(&mut self) -> Result<Option<T>> {
        if let Some(item) = self.inner.pop() {
            return Ok(Some(item));
        }
        if let Some(err) = &self.inner.error {
            return Err(err.clone());
        }
        if !self.meta.has_more() {
            return Ok(None);
        }

        let next = self.meta.page + 1;
        self.inner.params.set_page(next, self.meta.limit);
        self.meta = self.inner.fetch_page().await?;
        Ok(self.inner.pop())
    }

    /// Metadata of the most recently fetched page.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Terminal error, if one is set.
    pub fn error(&self) -> Option<&Error> {
        self.inner.error.as_ref()
    }

    /// Adapt the cursor into a `futures` stream of elements.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>>
    where
        P: Send + 'static,
        T: Send + 'static,
    {
        futures::stream::try_unfold(self, |mut it| async move {
            match it.try_next().await? {
                Some(item) => Ok(Some((item, it))),
                None => Ok(None),
            }
        })
    }
}

// ============================================================================
// Simulated iterator
// ============================================================================

/// Cursor over a naturally non-paginated list endpoint.
///
/// Fetches exactly one page at construction and never advances, regardless
/// of any pagination headers the response happened to carry.
pub struct SimulatedIterator<P, T> {
    inner: PageBuffer<P, T>,
    meta: PageMeta,
}

impl<P, T> SimulatedIterator<P, T>
where
    P: Clone,
{
    pub(crate) async fn new(
        params: P,
        fetch: FetchFn<P, T>,
        precondition: Option<Precondition<P>>,
    ) -> Self {
        let mut inner = PageBuffer::new(params, fetch, precondition);
        let meta = inner.fetch_page().await.unwrap_or_default();
        Self { inner, meta }
    }

    /// Yield the next buffered element.
    ///
    /// Returns the sticky terminal error if the single fetch failed,
    /// `Ok(None)` once the buffer drains.
    pub async fn try_next(&mut self) -> Result<Option<T>> {
        if let Some(item) = self.inner.pop() {
            return Ok(Some(item));
        }
        if let Some(err) = &self.inner.error {
            return Err(err.clone());
        }
        Ok(None)
    }

    /// Metadata of the single fetched page.
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Terminal error, if one is set.
    pub fn error(&self) -> Option<&Error> {
        self.inner.error.as_ref()
    }

    /// Adapt the cursor into a `futures` stream of elements.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>>
    where
        P: Send + 'static,
        T: Send + 'static,
    {
        futures::stream::try_unfold(self, |mut it| async move {
            match it.try_next().await? {
                Some(item) => Ok(Some((item, it))),
                None => Ok(None),
            }
        })
    }
}
