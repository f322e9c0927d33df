//! HTTP backend
//!
//! Composes request assembly, the transport/retry executor, error
//! classification and response decoding into the two operations every
//! resource client is written against: a single-result [`Client::call`]
//! and the frame-producing [`Client::call_page`], plus the iterator
//! constructors built on top of the latter.

mod client;
mod request;

pub use client::Client;
