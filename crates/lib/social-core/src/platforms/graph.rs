//! Facebook pages and Instagram business accounts via the Graph API.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use social_store::MetricSet;

use crate::http::{UpstreamError, UpstreamResult, read_json};
use crate::params::Timeframe;

use super::{GraphCredentials, u64_at};

/// Insight metric names backing each counter.
#[derive(Debug, Clone, Copy)]
pub struct GraphMetricNames {
    pub engagement: &'static str,
    pub reach: &'static str,
    pub impressions: &'static str,
}

pub const FACEBOOK_METRICS: GraphMetricNames = GraphMetricNames {
    engagement: "page_post_engagements",
    reach: "page_impressions_unique",
    impressions: "page_impressions",
};

pub const INSTAGRAM_METRICS: GraphMetricNames = GraphMetricNames {
    engagement: "accounts_engaged",
    reach: "reach",
    impressions: "impressions",
};

pub async fn fetch_metrics(
    client: &Client,
    base_url: &str,
    credentials: &GraphCredentials,
    names: GraphMetricNames,
    timeframe: Timeframe,
) -> UpstreamResult<MetricSet> {
    let account_id = credentials.account_id.as_str();
    let token = credentials.access_token.as_str();

    let account: Value = read_json(
        client
            .get(format!("{base_url}/{account_id}"))
            .query(&[("fields", "followers_count"), ("access_token", token)])
            .send()
            .await?,
    )
    .await?;
    let followers = u64_at(&account, "/followers_count")?;

    let until = Utc::now();
    let since = until - Duration::days(timeframe.days());
    let metric_list = [names.engagement, names.reach, names.impressions].join(",");
    let insights: Value = read_json(
        client
            .get(format!("{base_url}/{account_id}/insights"))
            .query(&[
                ("metric", metric_list.as_str()),
                ("period", "day"),
                ("since", since.timestamp().to_string().as_str()),
                ("until", until.timestamp().to_string().as_str()),
                ("access_token", token),
            ])
            .send()
            .await?,
    )
    .await?;

    let series = insights
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Malformed("insights without data".to_string()))?;
    let total = |metric: &str| -> u64 {
        series
            .iter()
            .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(metric))
            .filter_map(|entry| entry.get("values").and_then(Value::as_array))
            .flatten()
            .filter_map(|point| point.get("value").and_then(Value::as_u64))
            .sum()
    };

    Ok(MetricSet {
        engagement: total(names.engagement),
        reach: total(names.reach),
        impressions: total(names.impressions),
        followers,
    })
}
