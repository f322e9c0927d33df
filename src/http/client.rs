//! HTTP backend with retry and error classification
//!
//! The backend executes built requests, resending while failures are
//! retryable and the attempt count is under the configured budget:
//! - Transport-level failures (no HTTP response at all) are retryable.
//! - 409 and every status >= 500 (the 520-522 upstream-proxy range
//!   included) are retryable.
//! - 429 is never retried: rate limiting is the caller's signal to back
//!   off, not a transient fault.
//!
//! Backoff grows exponentially with the retry count, clamped between the
//! configured floor and ceiling, with up to 25% random jitter subtracted
//! (never below the floor). `fast_retries` disables sleeping for tests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::FutureExt;
use rand::Rng;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::request;
use crate::config::ClientConfig;
use crate::decode;
use crate::error::{ApiError, Classifier, Error, ErrorCode, Result};
use crate::pagination::{FetchFn, Page, PagedIterator, Precondition, SimulatedIterator};
use crate::params::{ListParams, Params};
use crate::types::Method;

/// One decoded-enough HTTP exchange: everything the response decoder needs.
struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

/// The API backend.
///
/// Cheap to clone and safe to share across tasks; configuration is
/// immutable after construction. Per-call state (retry counters, iterator
/// cursors) is private to each operation.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a backend with its own HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Self::with_http_client(config, http)
    }

    /// Create a backend on an externally supplied HTTP transport.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        Url::parse(&config.base_url)?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// The configuration this backend was constructed with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========================================================================
    // Single-result calls
    // ========================================================================

    /// Issue one call and decode the response into `R`.
    pub async fn call<P, R>(&self, method: Method, path: &str, params: &P) -> Result<R>
    where
        P: Params,
        R: DeserializeOwned,
    {
        self.call_inner(method, path, params, None).await
    }

    /// Issue one call with a per-call status classifier.
    ///
    /// The classifier's mapping takes precedence over the default
    /// status table for this call only; `None` falls back to it.
    pub async fn call_with_classifier<P, R>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        classify: &Classifier,
    ) -> Result<R>
    where
        P: Params,
        R: DeserializeOwned,
    {
        self.call_inner(method, path, params, Some(classify)).await
    }

    async fn call_inner<P, R>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        classify: Option<&Classifier>,
    ) -> Result<R>
    where
        P: Params,
        R: DeserializeOwned,
    {
        let (response, resource) = self.execute(method, path, params, classify).await?;
        decode::decode_body(&resource, response.status, &response.headers, &response.body)
    }

    /// Fetch one page of a list endpoint: body elements plus the mandatory
    /// header-metadata decode step.
    pub async fn call_page<P, T>(&self, method: Method, path: &str, params: &P) -> Result<Page<T>>
    where
        P: Params,
        T: DeserializeOwned,
    {
        let (response, resource) = self.execute(method, path, params, None).await?;
        decode::decode_page(&resource, response.status, &response.headers, &response.body)
    }

    // ========================================================================
    // Iterator constructors
    // ========================================================================

    /// Iterate a paginated list endpoint. Page 1 is fetched eagerly.
    pub async fn paginate<P, T>(&self, method: Method, path: &str, params: P) -> PagedIterator<P, T>
    where
        P: ListParams + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        PagedIterator::new(params, self.page_fetcher(method, path), None).await
    }

    /// Iterate a paginated list endpoint, checking `condition` immediately
    /// before every page fetch (including the first).
    pub async fn paginate_with_condition<P, T>(
        &self,
        method: Method,
        path: &str,
        params: P,
        condition: Precondition<P>,
    ) -> PagedIterator<P, T>
    where
        P: ListParams + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        PagedIterator::new(params, self.page_fetcher(method, path), Some(condition)).await
    }

    /// Iterate a naturally non-paginated list endpoint: one fetch, no
    /// page advancement regardless of any pagination headers.
    pub async fn simulate<P, T>(
        &self,
        method: Method,
        path: &str,
        params: P,
    ) -> SimulatedIterator<P, T>
    where
        P: Params + Clone + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        SimulatedIterator::new(params, self.page_fetcher(method, path), None).await
    }

    /// Simulated iteration with a precondition on the single fetch.
    pub async fn simulate_with_condition<P, T>(
        &self,
        method: Method,
        path: &str,
        params: P,
        condition: Precondition<P>,
    ) -> SimulatedIterator<P, T>
    where
        P: Params + Clone + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        SimulatedIterator::new(params, self.page_fetcher(method, path), Some(condition)).await
    }

    /// Page-fetch function closing over this backend, for the iterator
    /// engine. Each invocation is one complete retried-and-decoded call.
    fn page_fetcher<P, T>(&self, method: Method, path: &str) -> FetchFn<P, T>
    where
        P: Params + 'static,
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        let path = path.to_string();
        Box::new(move |params: P| {
            let client = client.clone();
            let path = path.clone();
            async move { client.call_page(method, &path, &params).await }.boxed()
        })
    }

    // ========================================================================
    // Transport/retry executor
    // ========================================================================

    /// Execute a built request, resending while the failure is retryable
    /// and the attempt count is under budget.
    async fn execute<P: Params>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        classify: Option<&Classifier>,
    ) -> Result<(RawResponse, String)> {
        let (request, resource) = request::build(&self.http, &self.config, method, path, params)?;

        let mut retries: u32 = 0;
        loop {
            match self.send_once(&request, &resource, classify).await {
                Ok(response) => return Ok((response, resource)),
                Err(err) => {
                    if retries >= self.config.max_retries || !err.is_retryable() {
                        return Err(err);
                    }
                    let delay = self.backoff_delay(retries);
                    warn!(
                        resource = %resource,
                        retry = retries + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, backing off"
                    );
                    if !self.config.fast_retries {
                        tokio::time::sleep(delay).await;
                    }
                    retries += 1;
                }
            }
        }
    }

    /// One send attempt: re-arm the request from its byte buffer, send,
    /// and classify a >= 400 response into a structured error.
    async fn send_once(
        &self,
        request: &reqwest::Request,
        resource: &str,
        classify: Option<&Classifier>,
    ) -> Result<RawResponse> {
        // The body is a contiguous buffer, so cloning always succeeds for
        // requests this crate builds.
        let armed = request
            .try_clone()
            .ok_or_else(|| Error::config("request body is not replayable".to_string()))?;

        let started = Instant::now();
        let response = self.http.execute(armed).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(
            resource = %resource,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        if status >= 400 {
            let code = classify
                .and_then(|c| c(status))
                .unwrap_or_else(|| ErrorCode::from_status(status));
            return Err(ApiError {
                code,
                status,
                request_id: decode::request_id(&headers),
                resource: resource.to_string(),
                body: decode::body_sample(&String::from_utf8_lossy(&body)),
            }
            .into());
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Backoff before retry number `retry` (0-based).
    pub(crate) fn backoff_delay(&self, retry: u32) -> Duration {
        let floor = self.config.initial_backoff;
        let ceiling = self.config.max_backoff;

        let mut delay = floor
            .saturating_mul(2u32.saturating_pow(retry))
            .min(ceiling);

        // Up to 25% jitter subtracted, never dipping below the floor.
        let jitter = rand::thread_rng().gen_range(0.0..=0.25);
        delay = delay.mul_f64(1.0 - jitter);
        delay.max(floor)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
