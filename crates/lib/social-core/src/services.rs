use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::ai::{CompletionClient, CompletionConfig};
use crate::control::SocialControlPlane;
use crate::http::{DEFAULT_UPSTREAM_TIMEOUT, UpstreamError, build_client};
use crate::platforms::{PlatformAdapter, PlatformCredentials, PlatformEndpoints};
use crate::store::JsonDocStore;

/// Everything needed to assemble a control plane.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    pub data_dir: PathBuf,
    pub credentials: PlatformCredentials,
    pub endpoints: PlatformEndpoints,
    pub upstream_timeout: Duration,
    pub completion: Option<CompletionConfig>,
}

impl ServicesConfig {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            credentials: PlatformCredentials::default(),
            endpoints: PlatformEndpoints::default(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            completion: None,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: PlatformCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: PlatformEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub const fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_completion(mut self, completion: CompletionConfig) -> Self {
        self.completion = Some(completion);
        self
    }
}

#[derive(Debug)]
pub enum ServicesError {
    HttpClient(UpstreamError),
}

impl fmt::Display for ServicesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl Error for ServicesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
        }
    }
}

impl From<UpstreamError> for ServicesError {
    fn from(err: UpstreamError) -> Self {
        Self::HttpClient(err)
    }
}

/// Wires the store, platform adapter and optional AI client around one
/// shared HTTP client.
///
/// # Errors
/// Returns `ServicesError::HttpClient` if the HTTP client cannot be built.
pub fn build_control_plane(config: ServicesConfig) -> Result<SocialControlPlane, ServicesError> {
    let client = build_client(config.upstream_timeout)?;
    let store = JsonDocStore::new(config.data_dir);
    let configured = config.credentials.configured();
    let adapter = PlatformAdapter::new(client.clone(), config.credentials, config.endpoints);

    let mut control = SocialControlPlane::new(store, adapter);
    if let Some(completion) = config.completion {
        info!(model = %completion.model, "AI completions enabled");
        control = control.with_ai(CompletionClient::new(client, completion));
    }
    info!(
        data_dir = %control.store().dir().display(),
        live_platforms = ?configured,
        "control plane ready"
    );
    Ok(control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_credentials_or_ai() {
        let config = ServicesConfig::new("data");
        assert!(config.credentials.configured().is_empty());
        assert!(config.completion.is_none());
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);
    }

    #[tokio::test]
    async fn builds_with_ai_when_configured() {
        let config = ServicesConfig::new("data")
            .with_upstream_timeout(Duration::from_secs(1))
            .with_completion(CompletionConfig::new("test-key"));
        let control = build_control_plane(config).expect("control plane should build");
        assert!(control.ai_enabled());
        assert_eq!(control.store().dir(), std::path::Path::new("data"));
    }
}
