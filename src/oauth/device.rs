//! Device-authorization poller
//!
//! After a device code is issued, the application polls the token endpoint
//! on the interval the service dictated, until the user approves or denies
//! the request, the code expires, or the caller cancels. The poller runs
//! as one background task and delivers exactly one result over a one-shot
//! channel; the channel closes once the terminal branch has executed.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::types::{DeviceCode, DeviceCodeParams, DeviceTokenParams, TokenResponse};
use crate::error::{Error, ErrorCode, Result};
use crate::http::Client;
use crate::types::Method;

/// Poller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling,
    Succeeded,
    Failed,
    Expired,
    Cancelled,
}

/// Handle to a running device-authorization poller.
///
/// [`wait`](Self::wait) consumes the handle and yields the single result;
/// [`cancel`](Self::cancel) aborts the loop from outside.
pub struct DeviceTokenPoll {
    rx: oneshot::Receiver<Result<TokenResponse>>,
    cancel: CancellationToken,
    state: watch::Receiver<PollState>,
}

impl DeviceTokenPoll {
    /// Wait for the poller's one terminal result.
    pub async fn wait(self) -> Result<TokenResponse> {
        self.rx.await.unwrap_or(Err(Error::Cancelled))
    }

    /// Abort the poll loop. The pending [`wait`](Self::wait) resolves to
    /// [`Error::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }
}

/// Status mapping specific to the device-token endpoint. The service
/// overloads generic statuses with flow semantics here.
pub(crate) fn device_classifier(status: u16) -> Option<ErrorCode> {
    match status {
        400 => Some(ErrorCode::DeviceCodePending),
        404 => Some(ErrorCode::DeviceCodeInvalid),
        409 => Some(ErrorCode::DeviceCodeUsed),
        410 => Some(ErrorCode::DeviceCodeExpired),
        418 => Some(ErrorCode::DeviceCodeDenied),
        _ => None,
    }
}

impl Client {
    /// Request a device code for the user to approve.
    pub async fn device_code(&self) -> Result<DeviceCode> {
        let params = DeviceCodeParams {
            client_id: self.config().client_id.clone(),
        };
        self.call(Method::POST, "/oauth/device/code", &params).await
    }

    /// Start polling the token endpoint for the outcome of a device
    /// authorization.
    ///
    /// One immediate poll, then a fixed-interval loop raced against the
    /// code's expiry window and the supplied cancellation token. The
    /// returned handle yields exactly one result.
    pub fn poll_device_token(
        &self,
        device: &DeviceCode,
        client_secret: &str,
        cancel: CancellationToken,
    ) -> DeviceTokenPoll {
        let params = DeviceTokenParams {
            code: device.device_code.clone(),
            client_id: self.config().client_id.clone(),
            client_secret: client_secret.to_string(),
        };
        let period = Duration::from_secs(device.interval.max(1));
        let expires_in = Duration::from_secs(device.expires_in);

        let client = self.clone();
        let token = cancel.clone();
        let (tx, rx) = oneshot::channel();
        let (state_tx, state_rx) = watch::channel(PollState::Idle);

        tokio::spawn(async move {
            let result = run_poll(&client, &params, period, expires_in, &token, &state_tx).await;
            // The sender is consumed here: exactly one result, then the
            // channel closes.
            let _ = tx.send(result);
        });

        DeviceTokenPoll {
            rx,
            cancel,
            state: state_rx,
        }
    }
}

async fn run_poll(
    client: &Client,
    params: &DeviceTokenParams,
    period: Duration,
    expires_in: Duration,
    cancel: &CancellationToken,
    state: &watch::Sender<PollState>,
) -> Result<TokenResponse> {
    let deadline = tokio::time::Instant::now() + expires_in;
    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let _ = state.send(PollState::Polling);

    loop {
        // Cancellation and expiry win over a due tick.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                let _ = state.send(PollState::Cancelled);
                return Err(Error::Cancelled);
            }
            () = tokio::time::sleep_until(deadline) => {
                let _ = state.send(PollState::Expired);
                return Err(Error::Expired);
            }
            _ = timer.tick() => {}
        }

        // Cancellation and expiry also interrupt an in-flight poll.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                let _ = state.send(PollState::Cancelled);
                return Err(Error::Cancelled);
            }
            () = tokio::time::sleep_until(deadline) => {
                let _ = state.send(PollState::Expired);
                return Err(Error::Expired);
            }
            result = client.call_with_classifier::<_, TokenResponse>(
                Method::POST,
                "/oauth/device/token",
                params,
                &device_classifier,
            ) => match result {
                Ok(token) => {
                    let _ = state.send(PollState::Succeeded);
                    return Ok(token);
                }
                Err(err) if err.code() == Some(ErrorCode::DeviceCodePending) => {
                    debug!("device authorization pending, polling again");
                }
                Err(err) => {
                    let _ = state.send(PollState::Failed);
                    return Err(err);
                }
            }
        }
    }
}
