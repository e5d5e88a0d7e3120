use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::SCHEDULE_TIME_FORMAT;
use crate::timestamp;

/// Social network a post, metric, or competitor handle belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
}

impl Platform {
    pub const ALL: [Self; 4] = [Self::Twitter, Self::Facebook, Self::Instagram, Self::Linkedin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlatformError(pub String);

impl fmt::Display for ParsePlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl Error for ParsePlatformError {}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            "linkedin" => Ok(Self::Linkedin),
            _ => Err(ParsePlatformError(value.trim().to_string())),
        }
    }
}

/// Lifecycle of a scheduled post. Transitions are only ever caller-initiated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    #[serde(alias = "scheduled")]
    Pending,
    Posted,
    Failed,
    Cancelled,
}

impl PostStatus {
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A post recorded for future publication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledPost {
    pub id: String,
    pub content: String,
    pub platforms: Vec<Platform>,
    pub schedule_time: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_url: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub posted_at: Option<DateTime<Utc>>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.trim().is_empty()))
}

impl ScheduledPost {
    /// Parses `schedule_time` back into a local wall-clock timestamp.
    #[must_use]
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.schedule_time, SCHEDULE_TIME_FORMAT).ok()
    }
}

/// Whether a payload came from a platform API or from the mock generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Real,
    Mocked,
}

/// Account-level counters for one platform over one timeframe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MetricSet {
    pub engagement: u64,
    pub reach: u64,
    pub impressions: u64,
    pub followers: u64,
}

impl MetricSet {
    /// Engagement as a percentage of impressions, rounded to two decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        let rate = self.engagement as f64 / self.impressions as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// Cached analytics result for a single platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSnapshot {
    pub platform: Platform,
    pub timeframe: String,
    pub metric_type: String,
    pub metrics: MetricSet,
    pub engagement_rate: f64,
    pub source: DataSource,
    pub retrieved_at: DateTime<Utc>,
}

/// One trending topic with a popularity score in `0..=100`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendEntry {
    pub platform: String,
    pub category: String,
    pub location: String,
    pub topic: String,
    pub score: u32,
}

/// Cached trends lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendsSnapshot {
    pub entries: Vec<TrendEntry>,
    pub source: DataSource,
    pub cached_at: DateTime<Utc>,
}

/// Last analyzed numbers for one competitor account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompetitorMetrics {
    pub followers: u64,
    pub engagement_rate: f64,
    pub posts_per_week: u32,
    pub avg_likes: u32,
    pub avg_comments: u32,
}

/// A tracked competitor and its handles per platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competitor {
    pub name: String,
    #[serde(default)]
    pub platforms: BTreeMap<Platform, String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub added_on: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_analyzed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<Platform, CompetitorMetrics>,
}

impl Competitor {
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

pub type PostsDocument = Vec<ScheduledPost>;
pub type AnalyticsCache = BTreeMap<String, AnalyticsSnapshot>;
pub type TrendsCache = BTreeMap<String, TrendsSnapshot>;
pub type CompetitorsDocument = Vec<Competitor>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_scheduled_status_reads_as_pending() {
        let raw = r#"{
            "id": "ab12cd34",
            "content": "hello",
            "platforms": ["twitter", "linkedin"],
            "schedule_time": "2030-01-01 09:30",
            "media_url": "",
            "status": "scheduled",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let post: ScheduledPost = serde_json::from_str(raw).expect("legacy post should parse");
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.platforms, vec![Platform::Twitter, Platform::Linkedin]);
        assert!(post.scheduled_at().is_some());
    }

    #[test]
    fn posts_with_naive_timestamps_parse() {
        let raw = r#"{
            "id": "ab12cd34",
            "content": "Spring launch",
            "platforms": ["twitter", "instagram"],
            "schedule_time": "2030-05-01 09:30",
            "media_url": "",
            "status": "scheduled",
            "created_at": "2024-05-01T10:11:12.123456",
            "posted_at": null
        }"#;
        let post: ScheduledPost = serde_json::from_str(raw).expect("naive timestamps should parse");
        assert_eq!(post.id, "ab12cd34");
        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!(post.media_url, None);
        assert_eq!(post.posted_at, None);
        assert_eq!(
            Some(post.created_at),
            timestamp::parse_timestamp("2024-05-01T10:11:12.123456")
        );

        let cancelled = r#"{
            "id": "ef56ab78",
            "content": "Old promo",
            "platforms": ["facebook"],
            "schedule_time": "2030-05-02 18:00",
            "media_url": "https://cdn.example.com/promo.png",
            "status": "cancelled",
            "created_at": "2024-05-01T10:11:12",
            "cancelled_at": "2024-05-02T08:00:00.5"
        }"#;
        let post: ScheduledPost = serde_json::from_str(cancelled).expect("cancelled post should parse");
        assert_eq!(post.status, PostStatus::Cancelled);
        assert!(post.cancelled_at.is_some());
        assert_eq!(post.media_url.as_deref(), Some("https://cdn.example.com/promo.png"));
    }

    #[test]
    fn unrecognized_timestamp_is_an_error() {
        let raw = r#"{
            "id": "ab12cd34",
            "content": "hello",
            "platforms": ["twitter"],
            "schedule_time": "2030-01-01 09:30",
            "created_at": "last tuesday"
        }"#;
        assert!(serde_json::from_str::<ScheduledPost>(raw).is_err());
    }

    #[test]
    fn platform_parsing_is_case_insensitive() {
        assert_eq!(" Instagram ".parse::<Platform>(), Ok(Platform::Instagram));
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn engagement_rate_handles_zero_impressions() {
        let metrics = MetricSet {
            engagement: 10,
            ..MetricSet::default()
        };
        assert!(metrics.engagement_rate().abs() < f64::EPSILON);

        let metrics = MetricSet {
            engagement: 150,
            reach: 2500,
            impressions: 5000,
            followers: 1200,
        };
        assert!((metrics.engagement_rate() - 3.0).abs() < f64::EPSILON);
    }
}
