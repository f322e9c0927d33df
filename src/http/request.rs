//! Request assembly
//!
//! Builds one fully-formed outbound request from a method, a path and a
//! parameter value. The encoding branches on the verb: GET serializes the
//! parameters as a URL query string, write verbs serialize them as a JSON
//! body. The same parameter value never contributes both.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::config::{ClientConfig, API_KEY_HEADER, API_VERSION, API_VERSION_HEADER};
use crate::error::{Error, Result};
use crate::params::Params;
use crate::types::Method;

/// Assemble an outbound request.
///
/// Returns the request plus the normalized resource path used in error
/// values and logs. Bodies are contiguous buffers, so the executor can
/// re-arm the request for every retry attempt.
pub(crate) fn build<P: Params>(
    http: &reqwest::Client,
    config: &ClientConfig,
    method: Method,
    path: &str,
    params: &P,
) -> Result<(reqwest::Request, String)> {
    let resource = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let url = Url::parse(&format!(
        "{}{}",
        config.base_url.trim_end_matches('/'),
        resource
    ))?;

    let mut builder = http
        .request(method.into(), url)
        .headers(default_headers(config, params)?)
        .timeout(params.timeout().unwrap_or(config.timeout));

    if method.has_body() {
        let body = serde_json::to_vec(params).map_err(|err| Error::serialize(err.to_string()))?;
        builder = builder.body(Bytes::from(body));
    } else {
        builder = builder.query(params);
    }

    let request = builder.build()?;
    Ok((request, resource))
}

/// Default header set, with the parameter value's extra headers replacing
/// same-named entries (last-writer-wins per header line).
fn default_headers<P: Params>(config: &ClientConfig, params: &P) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(&config.user_agent)?);
    headers.insert(API_KEY_HEADER, header_value(&config.client_id)?);
    headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

    if let Some(token) = params.oauth_token().filter(|t| !t.is_empty()) {
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
    }

    if let Some(extra) = params.extra_headers() {
        for (name, value) in &extra {
            headers.insert(name, value.clone());
        }
    }

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::config(format!("header value is not valid ASCII: {value:?}")))
}
