//! Platform adapter: real API calls when credentials exist, deterministic
//! mock data otherwise.
//!
//! Callers always get a payload. The `source` tag on [`Sourced`] is the only
//! way to tell a live response from a fabricated one.

pub mod graph;
pub mod linkedin;
pub mod mock;
pub mod twitter;

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use social_store::{DataSource, MetricSet, Platform, TrendEntry};
use tracing::{debug, warn};

use crate::http::{UpstreamError, UpstreamResult};
use crate::params::{Timeframe, TrendCategory, TrendLocation, TrendPlatform};

pub const MAX_TREND_ENTRIES: usize = mock::MAX_TRENDS;

/// A payload tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub const fn real(data: T) -> Self {
        Self {
            data,
            source: DataSource::Real,
        }
    }

    pub const fn mocked(data: T) -> Self {
        Self {
            data,
            source: DataSource::Mocked,
        }
    }
}

/// Token plus account/page id for Graph API platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCredentials {
    pub access_token: String,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedinCredentials {
    pub access_token: String,
    pub organization_id: String,
}

/// Credential sets per platform. A platform without credentials is always
/// served from the mock generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformCredentials {
    pub twitter_bearer_token: Option<String>,
    pub facebook: Option<GraphCredentials>,
    pub instagram: Option<GraphCredentials>,
    pub linkedin: Option<LinkedinCredentials>,
}

impl PlatformCredentials {
    #[must_use]
    pub const fn has(&self, platform: Platform) -> bool {
        match platform {
            Platform::Twitter => self.twitter_bearer_token.is_some(),
            Platform::Facebook => self.facebook.is_some(),
            Platform::Instagram => self.instagram.is_some(),
            Platform::Linkedin => self.linkedin.is_some(),
        }
    }

    #[must_use]
    pub fn configured(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|platform| self.has(*platform))
            .collect()
    }
}

/// API base URLs, overridable for testing against local endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEndpoints {
    pub twitter: String,
    pub graph: String,
    pub linkedin: String,
}

impl PlatformEndpoints {
    /// Points every platform at the same base URL.
    #[must_use]
    pub fn uniform(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            twitter: base_url.clone(),
            graph: base_url.clone(),
            linkedin: base_url,
        }
    }
}

impl Default for PlatformEndpoints {
    fn default() -> Self {
        Self {
            twitter: "https://api.twitter.com".to_string(),
            graph: "https://graph.facebook.com/v18.0".to_string(),
            linkedin: "https://api.linkedin.com".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct PlatformAdapter {
    client: Client,
    credentials: Arc<PlatformCredentials>,
    endpoints: Arc<PlatformEndpoints>,
}

impl PlatformAdapter {
    #[must_use]
    pub fn new(client: Client, credentials: PlatformCredentials, endpoints: PlatformEndpoints) -> Self {
        Self {
            client,
            credentials: Arc::new(credentials),
            endpoints: Arc::new(endpoints),
        }
    }

    /// Account metrics for one platform over the given window.
    pub async fn fetch_metrics(&self, platform: Platform, timeframe: Timeframe) -> Sourced<MetricSet> {
        match self.real_metrics(platform, timeframe).await {
            Ok(metrics) => {
                debug!(%platform, %timeframe, "fetched live metrics");
                Sourced::real(metrics)
            }
            Err(err) => {
                log_fallback(platform.as_str(), "metrics", &err);
                Sourced::mocked(mock::mock_metrics(platform, timeframe))
            }
        }
    }

    /// Trending topics. Only Twitter has a live trends source.
    pub async fn fetch_trends(
        &self,
        platform: TrendPlatform,
        category: TrendCategory,
        location: TrendLocation,
    ) -> Sourced<Vec<TrendEntry>> {
        match self.real_trends(platform, category, location).await {
            Ok(entries) => Sourced::real(entries),
            Err(err) => {
                log_fallback(platform.as_str(), "trends", &err);
                Sourced::mocked(mock::mock_trends(platform, category, location))
            }
        }
    }

    async fn real_metrics(&self, platform: Platform, timeframe: Timeframe) -> UpstreamResult<MetricSet> {
        let credentials = &self.credentials;
        match platform {
            Platform::Twitter => {
                let token = credentials
                    .twitter_bearer_token
                    .as_deref()
                    .ok_or(UpstreamError::MissingCredentials("TWITTER_BEARER_TOKEN"))?;
                twitter::fetch_metrics(&self.client, &self.endpoints.twitter, token, timeframe).await
            }
            Platform::Facebook => {
                let facebook = credentials
                    .facebook
                    .as_ref()
                    .ok_or(UpstreamError::MissingCredentials("FACEBOOK_ACCESS_TOKEN"))?;
                graph::fetch_metrics(
                    &self.client,
                    &self.endpoints.graph,
                    facebook,
                    graph::FACEBOOK_METRICS,
                    timeframe,
                )
                .await
            }
            Platform::Instagram => {
                let instagram = credentials
                    .instagram
                    .as_ref()
                    .ok_or(UpstreamError::MissingCredentials("INSTAGRAM_ACCESS_TOKEN"))?;
                graph::fetch_metrics(
                    &self.client,
                    &self.endpoints.graph,
                    instagram,
                    graph::INSTAGRAM_METRICS,
                    timeframe,
                )
                .await
            }
            Platform::Linkedin => {
                let linkedin = credentials
                    .linkedin
                    .as_ref()
                    .ok_or(UpstreamError::MissingCredentials("LINKEDIN_ACCESS_TOKEN"))?;
                linkedin::fetch_metrics(&self.client, &self.endpoints.linkedin, linkedin, timeframe)
                    .await
            }
        }
    }

    async fn real_trends(
        &self,
        platform: TrendPlatform,
        category: TrendCategory,
        location: TrendLocation,
    ) -> UpstreamResult<Vec<TrendEntry>> {
        if platform != TrendPlatform::Twitter {
            return Err(UpstreamError::MissingCredentials("no live trends source"));
        }
        let token = self
            .credentials
            .twitter_bearer_token
            .as_deref()
            .ok_or(UpstreamError::MissingCredentials("TWITTER_BEARER_TOKEN"))?;
        twitter::fetch_trends(&self.client, &self.endpoints.twitter, token, category, location).await
    }
}

fn log_fallback(platform: &str, operation: &str, err: &UpstreamError) {
    if matches!(err, UpstreamError::MissingCredentials(_)) {
        debug!(platform, operation, "no credentials, serving mock data");
    } else {
        warn!(platform, operation, "live fetch failed, serving mock data: {err}");
    }
}

pub(crate) fn u64_at(value: &Value, pointer: &str) -> UpstreamResult<u64> {
    value
        .pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or_else(|| UpstreamError::Malformed(format!("missing numeric field {pointer}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;

    fn adapter(credentials: PlatformCredentials) -> PlatformAdapter {
        let client = build_client(std::time::Duration::from_millis(500)).expect("client");
        // Port 9 (discard) is closed on test hosts, so every live call fails fast.
        PlatformAdapter::new(client, credentials, PlatformEndpoints::uniform("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn missing_credentials_serve_mock_data() {
        let adapter = adapter(PlatformCredentials::default());
        let first = adapter.fetch_metrics(Platform::Instagram, Timeframe::Month).await;
        let second = adapter.fetch_metrics(Platform::Instagram, Timeframe::Month).await;
        assert_eq!(first.source, DataSource::Mocked);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_mock() {
        let adapter = adapter(PlatformCredentials {
            twitter_bearer_token: Some("token".to_string()),
            ..PlatformCredentials::default()
        });
        let metrics = adapter.fetch_metrics(Platform::Twitter, Timeframe::Week).await;
        assert_eq!(metrics.source, DataSource::Mocked);
        assert_eq!(metrics.data, mock::mock_metrics(Platform::Twitter, Timeframe::Week));

        let trends = adapter
            .fetch_trends(TrendPlatform::Twitter, TrendCategory::All, TrendLocation::Global)
            .await;
        assert_eq!(trends.source, DataSource::Mocked);
        assert!(!trends.data.is_empty());
    }

    #[test]
    fn configured_lists_platforms_with_credentials() {
        let credentials = PlatformCredentials {
            linkedin: Some(LinkedinCredentials {
                access_token: "t".to_string(),
                organization_id: "42".to_string(),
            }),
            ..PlatformCredentials::default()
        };
        assert_eq!(credentials.configured(), vec![Platform::Linkedin]);
    }
}
