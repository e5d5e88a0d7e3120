use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::Value;
use social_store::MetricSet;

use crate::http::{UpstreamError, UpstreamResult, read_json};
use crate::params::Timeframe;

use super::{LinkedinCredentials, u64_at};

/// Organization page counters from the v2 REST API.
pub async fn fetch_metrics(
    client: &Client,
    base_url: &str,
    credentials: &LinkedinCredentials,
    timeframe: Timeframe,
) -> UpstreamResult<MetricSet> {
    let organization = format!("urn:li:organization:{}", credentials.organization_id);
    let token = credentials.access_token.as_str();

    let network: Value = read_json(
        client
            .get(format!("{base_url}/v2/networkSizes/{organization}"))
            .bearer_auth(token)
            .query(&[("edgeType", "CompanyFollowedByMember")])
            .send()
            .await?,
    )
    .await?;
    let followers = u64_at(&network, "/firstDegreeSize")?;

    let end = Utc::now();
    let start = end - Duration::days(timeframe.days());
    let stats: Value = read_json(
        client
            .get(format!("{base_url}/v2/organizationalEntityShareStatistics"))
            .bearer_auth(token)
            .query(&[
                ("q", "organizationalEntity"),
                ("organizationalEntity", organization.as_str()),
                ("timeIntervals.timeGranularityType", "DAY"),
                (
                    "timeIntervals.timeRange.start",
                    start.timestamp_millis().to_string().as_str(),
                ),
                (
                    "timeIntervals.timeRange.end",
                    end.timestamp_millis().to_string().as_str(),
                ),
            ])
            .send()
            .await?,
    )
    .await?;

    let elements = stats
        .get("elements")
        .and_then(Value::as_array)
        .ok_or_else(|| UpstreamError::Malformed("share statistics without elements".to_string()))?;

    let mut metrics = MetricSet {
        followers,
        ..MetricSet::default()
    };
    for element in elements {
        let Some(totals) = element.get("totalShareStatistics") else {
            continue;
        };
        let counter = |name: &str| totals.get(name).and_then(Value::as_u64).unwrap_or(0);
        metrics.engagement += counter("likeCount")
            + counter("commentCount")
            + counter("shareCount")
            + counter("clickCount");
        metrics.reach += counter("uniqueImpressionsCount");
        metrics.impressions += counter("impressionCount");
    }
    Ok(metrics)
}
