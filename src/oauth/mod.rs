//! OAuth operations
//!
//! Token wire types plus the device-authorization flow. The device poller
//! is a bounded, cancellable retry loop built on top of the backend's
//! single-call operation; code exchange, refresh and revocation are plain
//! typed calls.

mod device;
mod types;

pub use device::{DeviceTokenPoll, PollState};
pub use types::{DeviceCode, TokenResponse};

use crate::error::Result;
use crate::http::Client;
use crate::types::Method;

use types::{ExchangeCodeParams, RefreshTokenParams, RevokeTokenParams};


impl Client {
    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        client_secret: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse> {
        let params = ExchangeCodeParams {
            code: code.to_string(),
            client_id: self.config().client_id.clone(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            grant_type: "authorization_code",
        };
        self.call(Method::POST, "/oauth/token", &params).await
    }

    /// Trade a refresh token for a fresh access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        client_secret: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse> {
        let params = RefreshTokenParams {
            refresh_token: refresh_token.to_string(),
            client_id: self.config().client_id.clone(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            grant_type: "refresh_token",
        };
        self.call(Method::POST, "/oauth/token", &params).await
    }

    /// Revoke an access token.
    pub async fn revoke_token(&self, token: &str, client_secret: &str) -> Result<()> {
        let params = RevokeTokenParams {
            token: token.to_string(),
            client_id: self.config().client_id.clone(),
            client_secret: client_secret.to_string(),
        };
        let _: serde_json::Value = self.call(Method::POST, "/oauth/revoke", &params).await?;
        Ok(())
    }
}
