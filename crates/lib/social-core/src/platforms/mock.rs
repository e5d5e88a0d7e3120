//! Deterministic mock payloads used whenever a platform API is unavailable.

use rand::Rng;
use social_store::{MetricSet, Platform, TrendEntry};

use crate::params::{Timeframe, TrendCategory, TrendLocation, TrendPlatform};
use crate::seed::seeded_rng;

const fn base_metrics(platform: Platform) -> MetricSet {
    match platform {
        Platform::Twitter => MetricSet {
            engagement: 150,
            reach: 2_500,
            impressions: 5_000,
            followers: 1_200,
        },
        Platform::Instagram => MetricSet {
            engagement: 300,
            reach: 4_000,
            impressions: 8_000,
            followers: 2_500,
        },
        Platform::Facebook => MetricSet {
            engagement: 200,
            reach: 3_000,
            impressions: 6_000,
            followers: 1_800,
        },
        Platform::Linkedin => MetricSet {
            engagement: 100,
            reach: 1_500,
            impressions: 3_000,
            followers: 800,
        },
    }
}

/// Activity counters scale with the window; followers do not.
const fn activity_multiplier(timeframe: Timeframe) -> u64 {
    match timeframe {
        Timeframe::Week => 1,
        Timeframe::Month => 4,
        Timeframe::Quarter => 12,
    }
}

#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn mock_metrics(platform: Platform, timeframe: Timeframe) -> MetricSet {
    let mut rng = seeded_rng(&["metrics", platform.as_str(), timeframe.as_str()]);
    let mut vary = |value: u64| -> u64 { (value as f64 * rng.gen_range(0.8..=1.2)).round() as u64 };

    let base = base_metrics(platform);
    let multiplier = activity_multiplier(timeframe);
    MetricSet {
        engagement: vary(base.engagement) * multiplier,
        reach: vary(base.reach) * multiplier,
        impressions: vary(base.impressions) * multiplier,
        followers: vary(base.followers),
    }
}

const TOPIC_TABLE: [(TrendCategory, [&str; 8]); 4] = [
    (
        TrendCategory::Technology,
        [
            "Artificial Intelligence",
            "Machine Learning",
            "Blockchain",
            "Cybersecurity",
            "Cloud Computing",
            "IoT",
            "5G Technology",
            "Quantum Computing",
        ],
    ),
    (
        TrendCategory::Business,
        [
            "Digital Marketing",
            "Remote Work",
            "Startup Funding",
            "E-commerce",
            "Sustainability",
            "Leadership",
            "Innovation",
            "Entrepreneurship",
        ],
    ),
    (
        TrendCategory::Entertainment,
        [
            "Streaming Services",
            "Gaming",
            "Virtual Reality",
            "Social Media Trends",
            "Content Creation",
            "Influencer Marketing",
            "Digital Art",
            "NFTs",
        ],
    ),
    (
        TrendCategory::Sports,
        [
            "Olympics",
            "World Cup",
            "NBA Finals",
            "Super Bowl",
            "Tennis Championships",
            "Formula 1",
            "Cricket World Cup",
            "Sports Analytics",
        ],
    ),
];

/// Topics per category are capped at ten; `all` mixes two from each.
pub const MAX_TRENDS: usize = 10;

fn topics_for(category: TrendCategory) -> Vec<(TrendCategory, &'static str)> {
    if category == TrendCategory::All {
        return TOPIC_TABLE
            .iter()
            .flat_map(|(category, topics)| topics.iter().take(2).map(|topic| (*category, *topic)))
            .take(MAX_TRENDS)
            .collect();
    }
    TOPIC_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(category, topics)| {
            topics
                .iter()
                .take(MAX_TRENDS)
                .map(|topic| (*category, *topic))
                .collect()
        })
        .unwrap_or_default()
}

/// Builds a ranked trend list. Scores are seeded from every request
/// parameter, so the ordering differs by location but never between calls.
#[must_use]
pub fn mock_trends(
    platform: TrendPlatform,
    category: TrendCategory,
    location: TrendLocation,
) -> Vec<TrendEntry> {
    let mut rng = seeded_rng(&[
        "trends",
        platform.as_str(),
        category.as_str(),
        location.as_str(),
    ]);
    let mut entries: Vec<TrendEntry> = topics_for(category)
        .into_iter()
        .map(|(topic_category, topic)| TrendEntry {
            platform: platform.as_str().to_string(),
            category: topic_category.as_str().to_string(),
            location: location.as_str().to_string(),
            topic: topic.to_string(),
            score: rng.gen_range(40..=100),
        })
        .collect();
    entries.sort_by(|left, right| right.score.cmp(&left.score));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_metrics_are_stable_and_scaled() {
        let week = mock_metrics(Platform::Twitter, Timeframe::Week);
        assert_eq!(week, mock_metrics(Platform::Twitter, Timeframe::Week));
        assert!((120..=180).contains(&week.engagement));
        assert!((960..=1_440).contains(&week.followers));

        let quarter = mock_metrics(Platform::Twitter, Timeframe::Quarter);
        assert_eq!(quarter.engagement % 12, 0);
        assert!(quarter.impressions >= 4_000 * 12);
    }

    #[test]
    fn all_category_mixes_two_per_category() {
        let entries = mock_trends(TrendPlatform::General, TrendCategory::All, TrendLocation::Global);
        assert_eq!(entries.len(), 8);
        for category in ["technology", "business", "entertainment", "sports"] {
            assert_eq!(
                entries.iter().filter(|entry| entry.category == category).count(),
                2
            );
        }
        assert!(entries.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn single_category_uses_its_table() {
        let entries =
            mock_trends(TrendPlatform::Twitter, TrendCategory::Sports, TrendLocation::Us);
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().any(|entry| entry.topic == "Formula 1"));
        assert!(entries.iter().all(|entry| entry.location == "US"));
    }
}
