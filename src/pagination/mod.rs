//! Pagination iterator engine
//!
//! Turns a page-fetch function into a lazy, forward-only sequence of
//! elements. Two strategies share a single-page buffer primitive:
//!
//! - [`PagedIterator`] walks a paginated endpoint page by page, advancing
//!   the page number from the header-sourced metadata of the last fetch.
//! - [`SimulatedIterator`] fetches exactly once and never advances, giving
//!   naturally non-paginated list endpoints the same iteration surface.
//!
//! Both accept an optional precondition evaluated before every fetch, and
//! both treat any fetch error as sticky: once set, the cursor never
//! advances again. Iterators are single-consumer and not meant to be
//! shared across tasks.

mod iterator;
mod types;

pub use iterator::{PagedIterator, SimulatedIterator};
pub use types::{FetchFn, Page, PageMeta, Precondition};
