//! Shared outbound HTTP plumbing for platform and AI calls.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure talking to an external platform or AI provider.
///
/// These never reach tool callers directly; the adapter and feature modules
/// degrade to mock or heuristic output instead.
#[derive(Debug)]
pub enum UpstreamError {
    MissingCredentials(&'static str),
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Malformed(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials(what) => write!(f, "missing credentials: {what}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status { status, body } => write!(f, "upstream returned {status}: {body}"),
            Self::Malformed(message) => write!(f, "unexpected upstream payload: {message}"),
        }
    }
}

impl Error for UpstreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Builds the shared client used for every outbound call.
///
/// # Errors
/// Returns `UpstreamError::Transport` if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> UpstreamResult<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("social-mcp/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Rejects non-success statuses and decodes the JSON body.
///
/// # Errors
/// Returns `UpstreamError::Status` for non-2xx responses and
/// `UpstreamError::Transport` if the body is not valid JSON for `T`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> UpstreamResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(512)
            .collect();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}
