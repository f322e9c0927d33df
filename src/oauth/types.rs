//! OAuth wire types.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};

use crate::params::Params;

/// Response of a device-code request: what the user must enter where, and
/// how the application should poll for the outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCode {
    /// Opaque code the application polls with.
    pub device_code: String,
    /// Short code the user enters on the verification page.
    pub user_code: String,
    /// Page where the user approves the application.
    pub verification_url: String,
    /// Seconds until the device code expires.
    pub expires_in: u64,
    /// Seconds to wait between polls.
    pub interval: u64,
}

/// An issued OAuth token pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds the access token stays valid after `created_at`.
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: String,
    /// Issue time, unix seconds.
    pub created_at: i64,
}

impl TokenResponse {
    /// Issue time as a UTC timestamp, when representable.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.created_at, 0)
    }

    /// Expiry time of the access token, when representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.created()
            .map(|created| created + ChronoDuration::seconds(self.expires_in as i64))
    }

    /// Whether the access token's validity window has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }
}

// ============================================================================
// Call parameters
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeviceCodeParams {
    pub client_id: String,
}

impl Params for DeviceCodeParams {}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeviceTokenParams {
    pub code: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Params for DeviceTokenParams {}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExchangeCodeParams {
    pub code: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub grant_type: &'static str,
}

impl Params for ExchangeCodeParams {}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RefreshTokenParams {
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub grant_type: &'static str,
}

impl Params for RefreshTokenParams {}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RevokeTokenParams {
    pub token: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Params for RevokeTokenParams {}
