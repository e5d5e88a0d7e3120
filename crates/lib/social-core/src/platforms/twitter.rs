use chrono::{Duration, SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use social_store::{MetricSet, TrendEntry};

use crate::http::{UpstreamError, UpstreamResult, read_json};
use crate::params::{Timeframe, TrendCategory, TrendLocation, TrendPlatform};

use super::{u64_at, MAX_TREND_ENTRIES};

/// Account counters from the v2 API.
///
/// Twitter exposes no reach figure, so reach mirrors impressions.
pub async fn fetch_metrics(
    client: &Client,
    base_url: &str,
    bearer_token: &str,
    timeframe: Timeframe,
) -> UpstreamResult<MetricSet> {
    let me: Value = read_json(
        client
            .get(format!("{base_url}/2/users/me"))
            .bearer_auth(bearer_token)
            .query(&[("user.fields", "public_metrics")])
            .send()
            .await?,
    )
    .await?;

    let user_id = me
        .pointer("/data/id")
        .and_then(Value::as_str)
        .ok_or_else(|| UpstreamError::Malformed("users/me without data.id".to_string()))?;
    let followers = u64_at(&me, "/data/public_metrics/followers_count")?;

    let start_time = (Utc::now() - Duration::days(timeframe.days()))
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    let tweets: Value = read_json(
        client
            .get(format!("{base_url}/2/users/{user_id}/tweets"))
            .bearer_auth(bearer_token)
            .query(&[
                ("max_results", "100"),
                ("tweet.fields", "public_metrics"),
                ("start_time", start_time.as_str()),
            ])
            .send()
            .await?,
    )
    .await?;

    let mut metrics = MetricSet {
        followers,
        ..MetricSet::default()
    };
    for tweet in tweets
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
    {
        let counter = |name: &str| {
            tweet
                .pointer(&format!("/public_metrics/{name}"))
                .and_then(Value::as_u64)
                .unwrap_or(0)
        };
        metrics.engagement += counter("like_count")
            + counter("retweet_count")
            + counter("reply_count")
            + counter("quote_count");
        metrics.impressions += counter("impression_count");
    }
    metrics.reach = metrics.impressions;
    Ok(metrics)
}

/// Location trends from the v1.1 endpoint. The API has no category filter, so
/// entries are labelled with the requested category.
#[allow(clippy::cast_possible_truncation)]
pub async fn fetch_trends(
    client: &Client,
    base_url: &str,
    bearer_token: &str,
    category: TrendCategory,
    location: TrendLocation,
) -> UpstreamResult<Vec<TrendEntry>> {
    let body: Value = read_json(
        client
            .get(format!("{base_url}/1.1/trends/place.json"))
            .bearer_auth(bearer_token)
            .query(&[("id", location.woeid())])
            .send()
            .await?,
    )
    .await?;

    let trends = body
        .pointer("/0/trends")
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Malformed("trends/place without trends".to_string()))?;

    let named: Vec<(&str, Option<u64>)> = trends
        .iter()
        .filter_map(|trend| {
            let name = trend.get("name").and_then(Value::as_str)?;
            Some((name, trend.get("tweet_volume").and_then(Value::as_u64)))
        })
        .take(MAX_TREND_ENTRIES)
        .collect();
    if named.is_empty() {
        return Err(UpstreamError::Malformed("trends/place returned no trends".to_string()));
    }

    let peak = named
        .iter()
        .filter_map(|(_, volume)| *volume)
        .max()
        .unwrap_or(0)
        .max(1);
    Ok(named
        .into_iter()
        .map(|(name, volume)| TrendEntry {
            platform: TrendPlatform::Twitter.as_str().to_string(),
            category: category.as_str().to_string(),
            location: location.as_str().to_string(),
            topic: name.to_string(),
            score: volume.map_or(50, |volume| (volume * 100 / peak).clamp(1, 100) as u32),
        })
        .collect())
}
