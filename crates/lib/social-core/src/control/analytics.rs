use chrono::Utc;
use serde::{Deserialize, Serialize};
use social_store::schema::make_analytics_key;
use social_store::{AnalyticsCache, AnalyticsSnapshot, DataSource, MetricSet, Platform};
use tracing::{debug, warn};

use crate::features::audience::round_to;
use crate::params::{MetricType, Timeframe, parse_analytics_target};
use crate::store::DocumentKind;

use super::{ControlError, SocialControlPlane, keyword_or, required};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub platform: String,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub metric_type: Option<String>,
}

/// Metrics for one platform, reduced to the requested metric type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformAnalytics {
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impressions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    pub engagement_rate: f64,
    pub source: DataSource,
}

impl PlatformAnalytics {
    fn filtered(platform: Platform, metrics: MetricSet, metric_type: MetricType, source: DataSource) -> Self {
        let pick = |kind: MetricType, value: u64| metric_type.includes(kind).then_some(value);
        Self {
            platform,
            engagement: pick(MetricType::Engagement, metrics.engagement),
            reach: pick(MetricType::Reach, metrics.reach),
            impressions: pick(MetricType::Impressions, metrics.impressions),
            followers: pick(MetricType::Followers, metrics.followers),
            engagement_rate: metrics.engagement_rate(),
            source,
        }
    }
}

/// Sums across platforms; the rate is the mean of per-platform rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalyticsTotals {
    pub platforms: usize,
    pub engagement: u64,
    pub reach: u64,
    pub impressions: u64,
    pub followers: u64,
    pub average_engagement_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub timeframe: Timeframe,
    pub metric_type: MetricType,
    pub platforms: Vec<PlatformAnalytics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<AnalyticsTotals>,
    pub insights: Vec<String>,
}

const STANDING_TIPS: [&str; 3] = [
    "Post consistently to maintain audience engagement",
    "Reply to comments quickly to boost interaction",
    "Compare timeframes to spot seasonal patterns",
];

fn totals(sets: &[MetricSet]) -> AnalyticsTotals {
    #[allow(clippy::cast_precision_loss)]
    let average = if sets.is_empty() {
        0.0
    } else {
        sets.iter().map(MetricSet::engagement_rate).sum::<f64>() / sets.len() as f64
    };
    AnalyticsTotals {
        platforms: sets.len(),
        engagement: sets.iter().map(|m| m.engagement).sum(),
        reach: sets.iter().map(|m| m.reach).sum(),
        impressions: sets.iter().map(|m| m.impressions).sum(),
        followers: sets.iter().map(|m| m.followers).sum(),
        average_engagement_rate: round_to(average, 2),
    }
}

fn insights(rate: f64) -> Vec<String> {
    let headline = if rate > 3.0 {
        format!("Great engagement rate of {rate}%, keep doing what works")
    } else if rate > 1.0 {
        format!("Good engagement rate of {rate}%, there is room to grow")
    } else {
        format!("Low engagement rate of {rate}%, try more interactive content")
    };
    std::iter::once(headline)
        .chain(STANDING_TIPS.iter().map(ToString::to_string))
        .collect()
}

impl SocialControlPlane {
    /// Fetches metrics for one platform, or every platform for `all`, and
    /// refreshes the analytics cache.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for a missing or unknown platform,
    /// timeframe or metric type. Cache write failures are only logged.
    pub async fn get_analytics(&self, request: &AnalyticsRequest) -> Result<AnalyticsReport, ControlError> {
        let platforms = parse_analytics_target(required("platform", Some(request.platform.as_str()))?)?;
        let timeframe = keyword_or(request.timeframe.as_deref(), Timeframe::Month)?;
        let metric_type = keyword_or(request.metric_type.as_deref(), MetricType::All)?;

        let mut rows = Vec::with_capacity(platforms.len());
        let mut sets = Vec::with_capacity(platforms.len());
        let mut snapshots = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let fetched = self.adapter.fetch_metrics(platform, timeframe).await;
            rows.push(PlatformAnalytics::filtered(
                platform,
                fetched.data,
                metric_type,
                fetched.source,
            ));
            sets.push(fetched.data);
            snapshots.push(AnalyticsSnapshot {
                platform,
                timeframe: timeframe.to_string(),
                metric_type: metric_type.to_string(),
                metrics: fetched.data,
                engagement_rate: fetched.data.engagement_rate(),
                source: fetched.source,
                retrieved_at: Utc::now(),
            });
        }

        self.cache_analytics(snapshots).await;

        let totals = (sets.len() > 1).then(|| totals(&sets));
        let rate = totals.map_or_else(
            || sets.first().map_or(0.0, MetricSet::engagement_rate),
            |totals| totals.average_engagement_rate,
        );
        Ok(AnalyticsReport {
            timeframe,
            metric_type,
            platforms: rows,
            totals,
            insights: insights(rate),
        })
    }

    async fn cache_analytics(&self, snapshots: Vec<AnalyticsSnapshot>) {
        let written = snapshots.len();
        let result = self
            .store
            .update(DocumentKind::Analytics, |cache: &mut AnalyticsCache| {
                for snapshot in snapshots {
                    let key = make_analytics_key(
                        snapshot.platform.as_str(),
                        &snapshot.timeframe,
                        &snapshot.metric_type,
                    );
                    cache.insert(key, snapshot);
                }
                Ok::<_, ControlError>(())
            })
            .await;
        match result {
            Ok(()) => debug!(entries = written, "analytics cache updated"),
            Err(err) => warn!("failed to update analytics cache: {err}"),
        }
    }
}
