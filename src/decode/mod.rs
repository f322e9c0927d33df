//! Response decoding
//!
//! Decodes JSON response bodies into caller-supplied receivers, and reads
//! the second, header-sourced decode step for list endpoints: the four
//! pagination headers become a [`PageMeta`]. Decode failures classify as
//! `encoding_error` and carry a log-safe, truncated body sample.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ApiError, ErrorCode, Result};
use crate::pagination::{Page, PageMeta};

#[cfg(test)]
mod tests;

pub(crate) const PAGINATION_LIMIT_HEADER: &str = "X-Pagination-Limit";
pub(crate) const PAGINATION_PAGE_HEADER: &str = "X-Pagination-Page";
pub(crate) const PAGINATION_PAGE_COUNT_HEADER: &str = "X-Pagination-Page-Count";
pub(crate) const PAGINATION_ITEM_COUNT_HEADER: &str = "X-Pagination-Item-Count";
pub(crate) const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Error payloads keep at most this many characters of the raw body.
const MAX_BODY_SAMPLE: usize = 500;

/// Truncate a response body and escape embedded newlines so the sample can
/// be logged on a single line.
pub(crate) fn body_sample(body: &str) -> String {
    let truncated: String = body.chars().take(MAX_BODY_SAMPLE).collect();
    truncated.replace('\r', "\\r").replace('\n', "\\n")
}

/// Value of the request-id response header, when present.
pub(crate) fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Decode a JSON body into the caller's receiver.
///
/// Failures are classified `encoding_error` regardless of the response
/// status, carrying the truncated body for diagnosis.
pub(crate) fn decode_body<R: DeserializeOwned>(
    resource: &str,
    status: u16,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<R> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(resource, status, error = %err, "failed to decode response body");
        ApiError {
            code: ErrorCode::EncodingError,
            status,
            request_id: request_id(headers),
            resource: resource.to_string(),
            body: body_sample(&String::from_utf8_lossy(body)),
        }
        .into()
    })
}

/// Decode one page of a list endpoint: body elements plus the mandatory
/// header metadata step. The header decode is never skipped, even when the
/// body already produced a usable collection.
pub(crate) fn decode_page<T: DeserializeOwned>(
    resource: &str,
    status: u16,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Page<T>> {
    if body.is_empty() || body == b"null" {
        return Err(ApiError {
            code: ErrorCode::EmptyFrameData,
            status,
            request_id: request_id(headers),
            resource: resource.to_string(),
            body: String::new(),
        }
        .into());
    }

    let items: Vec<T> = decode_body(resource, status, headers, body)?;
    Ok(Page::new(items, page_meta(headers)))
}

/// Read the four pagination headers into a [`PageMeta`].
/// Missing or unparseable headers decode to zero.
pub(crate) fn page_meta(headers: &HeaderMap) -> PageMeta {
    PageMeta {
        limit: header_u64(headers, PAGINATION_LIMIT_HEADER),
        page: header_u64(headers, PAGINATION_PAGE_HEADER),
        page_count: header_u64(headers, PAGINATION_PAGE_COUNT_HEADER),
        item_count: header_u64(headers, PAGINATION_ITEM_COUNT_HEADER),
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
