//! Request parameter traits
//!
//! Every call site hands the backend a parameter value implementing
//! [`Params`]. The value is serialized as a URL query string for GET and as
//! a JSON body for write verbs; it additionally supplies the optional OAuth
//! token and extra headers for the request. List endpoints use
//! [`ListParams`], which lets the pagination engine re-target the value at
//! a specific page between fetches.

use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Serialize;

/// Capabilities every call-site parameter value must supply.
///
/// Cancellation follows Rust convention: dropping the call future aborts
/// the exchange, including any in-flight retry loop. A per-call [`timeout`]
/// bounds each attempt on top of that.
///
/// [`timeout`]: Params::timeout
pub trait Params: Serialize + Send + Sync {
    /// OAuth bearer token for this call. Non-empty values become an
    /// `Authorization: Bearer` header.
    fn oauth_token(&self) -> Option<&str> {
        None
    }

    /// Extra request headers. Same-named defaults are replaced,
    /// last-writer-wins per header line.
    fn extra_headers(&self) -> Option<HeaderMap> {
        None
    }

    /// Per-attempt timeout override for this call.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// Parameters for paginated list endpoints.
///
/// The iterator engine owns the value between fetches and mutates only the
/// page/limit fields; everything else stays as the caller built it.
pub trait ListParams: Params + Clone {
    /// Re-target the value at page `page` with page size `limit`.
    fn set_page(&mut self, page: u64, limit: u64);

    /// Currently requested page, if any.
    fn page(&self) -> Option<u64>;

    /// Currently requested page size, if any.
    fn limit(&self) -> Option<u64>;
}

/// Parameters for endpoints that take none.
///
/// Serializes to an empty query string / empty JSON object.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

impl Params for NoParams {}

/// Page/limit selection embedded (flattened) into list parameter structs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    /// Page number, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Select a specific page and page size.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Overwrite both fields.
    pub fn set(&mut self, page: u64, limit: u64) {
        self.page = Some(page);
        self.limit = Some(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Serialize)]
    struct TrendingParams {
        #[serde(flatten)]
        page: PageQuery,
        #[serde(skip_serializing_if = "Option::is_none")]
        extended: Option<String>,
    }

    impl Params for TrendingParams {}

    impl ListParams for TrendingParams {
        fn set_page(&mut self, page: u64, limit: u64) {
            self.page.set(page, limit);
        }

        fn page(&self) -> Option<u64> {
            self.page.page
        }

        fn limit(&self) -> Option<u64> {
            self.page.limit
        }
    }

    #[test]
    fn test_page_query_skips_empty_fields() {
        let params = TrendingParams {
            page: PageQuery::default(),
            extended: None,
        };
        let encoded = serde_json::to_value(&params).unwrap();
        assert_eq!(encoded, serde_json::json!({}));
    }

    #[test]
    fn test_set_page_keeps_other_fields() {
        let mut params = TrendingParams {
            page: PageQuery::new(1, 10),
            extended: Some("full".into()),
        };
        params.set_page(2, 10);

        assert_eq!(params.page(), Some(2));
        assert_eq!(params.limit(), Some(10));
        let encoded = serde_json::to_value(&params).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"page": 2, "limit": 10, "extended": "full"})
        );
    }

    #[test]
    fn test_no_params_serializes_empty() {
        let encoded = serde_json::to_value(NoParams::default()).unwrap();
        assert_eq!(encoded, serde_json::json!({}));
    }

    #[test]
    fn test_default_capabilities() {
        let params = NoParams::default();
        assert!(params.oauth_token().is_none());
        assert!(params.extra_headers().is_none());
        assert!(params.timeout().is_none());
    }
}
