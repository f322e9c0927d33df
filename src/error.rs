//! Error types for the Trakt client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! HTTP failures are carried as a structured [`ApiError`] holding the
//! status, the classified [`ErrorCode`], the request id, the resource path
//! and a truncated copy of the response body.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

// ============================================================================
// Error codes
// ============================================================================

/// Classified error kind attached to every failed API exchange.
///
/// The closed set mirrors the service's documented status semantics; a few
/// endpoints re-map generic statuses to domain-specific codes through a
/// per-call [`Classifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InvalidOperation,
    ResourceConflict,
    InvalidContentType,
    ValidationError,
    RateLimitExceeded,
    ServerError,
    ServerUnavailable,
    UnknownError,
    /// Response body could not be decoded into the expected receiver.
    EncodingError,
    /// A list endpoint returned a frame with no decodable payload.
    EmptyFrameData,

    // Device authorization flow
    DeviceCodePending,
    DeviceCodeInvalid,
    DeviceCodeUsed,
    DeviceCodeExpired,
    DeviceCodeDenied,

    // Check-in
    CheckinInProgress,

    // Comments
    CommentInvalidUser,
    CommentInvalidItem,
    CommentNotRemovable,
}

impl ErrorCode {
    /// Map an HTTP status code to its default error code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::InvalidOperation,
            409 => Self::ResourceConflict,
            412 => Self::InvalidContentType,
            422 => Self::ValidationError,
            429 => Self::RateLimitExceeded,
            500 => Self::ServerError,
            503 | 504 | 520 | 521 | 522 => Self::ServerUnavailable,
            _ => Self::UnknownError,
        }
    }

    /// Stable snake_case name, used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InvalidOperation => "invalid_operation",
            Self::ResourceConflict => "resource_conflict",
            Self::InvalidContentType => "invalid_content_type",
            Self::ValidationError => "validation_error",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::ServerError => "server_error",
            Self::ServerUnavailable => "server_unavailable",
            Self::UnknownError => "unknown_error",
            Self::EncodingError => "encoding_error",
            Self::EmptyFrameData => "empty_frame_data",
            Self::DeviceCodePending => "device_code_pending",
            Self::DeviceCodeInvalid => "device_code_invalid",
            Self::DeviceCodeUsed => "device_code_used",
            Self::DeviceCodeExpired => "device_code_expired",
            Self::DeviceCodeDenied => "device_code_denied",
            Self::CheckinInProgress => "checkin_in_progress",
            Self::CommentInvalidUser => "comment_invalid_user",
            Self::CommentInvalidItem => "comment_invalid_item",
            Self::CommentNotRemovable => "comment_not_removable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call override of the status-to-code mapping.
///
/// Returning `None` falls back to [`ErrorCode::from_status`]. Endpoints
/// that overload generic statuses (device-token polling, check-in,
/// comment mutation) pass one of these alongside the call.
pub type Classifier = dyn Fn(u16) -> Option<ErrorCode> + Send + Sync;

// ============================================================================
// Structured API error
// ============================================================================

/// Structured error for one failed HTTP exchange or decode failure.
///
/// Constructed exactly once per failure and immutable afterwards. The body
/// is truncated and newline-escaped so the value is safe to log verbatim.
#[derive(Debug, Clone, Error)]
#[error("trakt: {code} (HTTP {status}) on {resource}")]
pub struct ApiError {
    /// Classified error kind.
    pub code: ErrorCode,
    /// HTTP status of the response (0 for pure decode failures).
    pub status: u16,
    /// Value of the `X-Request-Id` response header, when present.
    pub request_id: Option<String>,
    /// Resource path the request was issued against.
    pub resource: String,
    /// Raw response body, truncated to a bounded length.
    pub body: String,
}

// ============================================================================
// Crate error
// ============================================================================

/// The main error type for the Trakt client.
///
/// `Clone` so iterator cursors can hold a sticky terminal error and return
/// it from every subsequent poll; the non-clonable `reqwest::Error` is
/// shared behind an `Arc` for that reason.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The service answered with a status >= 400, or decoding failed.
    #[error(transparent)]
    Api(#[from] Box<ApiError>),

    /// Transport-level failure: no HTTP response was produced at all.
    #[error("transport error: {0}")]
    Transport(Arc<reqwest::Error>),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters could not be serialized.
    #[error("failed to serialize request parameters: {message}")]
    Serialize {
        /// Serializer diagnostic.
        message: String,
    },

    /// Parameter validation failed before any network call was made.
    #[error("{message}")]
    Params {
        /// What was wrong with the parameters.
        message: String,
    },

    /// Client configuration error (bad header value, unusable body).
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The operation was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,

    /// The device-authorization window elapsed before a terminal poll.
    #[error("device authorization window elapsed")]
    Expired,
}

impl Error {
    /// Create a parameter validation error.
    pub fn params(message: impl Into<String>) -> Self {
        Self::Params {
            message: message.into(),
        }
    }

    pub(crate) fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classified code, when this error carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }

    /// HTTP status, when this error came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) if err.status != 0 => Some(err.status),
            _ => None,
        }
    }

    /// Whether the retry executor may resend the request.
    ///
    /// 409 and the whole >= 500 range (including the 520-522 upstream-proxy
    /// statuses) are retryable; 429 deliberately is not — the caller must
    /// back off explicitly. Transport failures are always retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api(err) => err.status == 409 || err.status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}

/// Result type alias for the Trakt client.
pub type Result<T> = std::result::Result<T, Error>;
