use chrono::Utc;
use serde::{Deserialize, Serialize};
use social_store::schema::make_trends_key;
use social_store::{DataSource, TrendEntry, TrendsCache, TrendsSnapshot};
use tracing::{debug, warn};

use crate::features::trends::{TIMING_TIPS, content_ideas, strategy_tips};
use crate::params::{TrendCategory, TrendLocation, TrendPlatform};
use crate::store::DocumentKind;

use super::{ControlError, SocialControlPlane, keyword_or};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendsRequest {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Trending topics with ideas and tips. Carries no timestamps, so identical
/// mocked lookups serialize identically.
#[derive(Debug, Clone, Serialize)]
pub struct TrendsReport {
    pub platform: TrendPlatform,
    pub category: TrendCategory,
    pub location: TrendLocation,
    pub topics: Vec<TrendEntry>,
    pub source: DataSource,
    pub content_ideas: Vec<String>,
    pub strategy_tips: Vec<&'static str>,
    pub timing_tips: Vec<&'static str>,
}

impl SocialControlPlane {
    /// Looks up trending topics and refreshes the trends cache.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for an unknown platform, category
    /// or location. Cache write failures are only logged.
    pub async fn get_trending_topics(&self, request: &TrendsRequest) -> Result<TrendsReport, ControlError> {
        let platform = keyword_or(request.platform.as_deref(), TrendPlatform::General)?;
        let category = keyword_or(request.category.as_deref(), TrendCategory::All)?;
        let location = keyword_or(request.location.as_deref(), TrendLocation::Global)?;

        let fetched = self.adapter.fetch_trends(platform, category, location).await;
        let key = make_trends_key(platform.as_str(), category.as_str(), location.as_str());
        let snapshot = TrendsSnapshot {
            entries: fetched.data.clone(),
            source: fetched.source,
            cached_at: Utc::now(),
        };
        let cached = self
            .store
            .update(DocumentKind::Trends, |cache: &mut TrendsCache| {
                cache.insert(key.clone(), snapshot);
                Ok::<_, ControlError>(())
            })
            .await;
        match cached {
            Ok(()) => debug!(%key, "trends cache updated"),
            Err(err) => warn!(%key, "failed to update trends cache: {err}"),
        }

        Ok(TrendsReport {
            platform,
            category,
            location,
            content_ideas: content_ideas(&fetched.data),
            topics: fetched.data,
            source: fetched.source,
            strategy_tips: strategy_tips(platform).to_vec(),
            timing_tips: TIMING_TIPS.to_vec(),
        })
    }
}
