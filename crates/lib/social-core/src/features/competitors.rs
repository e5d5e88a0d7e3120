//! Competitor strategy analysis and side-by-side comparison.

use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use social_store::{Competitor, CompetitorMetrics, Platform};

use super::audience::{Share, normalize, round_to};
use crate::seed::seeded_rng;

pub const MIN_COMPARED: usize = 2;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const PEAK_HOURS: [&str; 5] = ["9AM", "12PM", "3PM", "6PM", "9PM"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentStrategy {
    pub post_types: Vec<Share>,
    pub top_topics: Vec<Share>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingSchedule {
    pub most_active_days: Vec<&'static str>,
    pub peak_hours: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorAnalysis {
    pub metrics: BTreeMap<Platform, CompetitorMetrics>,
    pub content_strategy: ContentStrategy,
    pub posting_schedule: PostingSchedule,
    pub insights: Vec<String>,
}

fn rng_for(competitor: &Competitor) -> StdRng {
    let name = competitor.name.trim().to_lowercase();
    let platforms: Vec<&str> = competitor.platforms.keys().map(|platform| platform.as_str()).collect();
    let platforms = platforms.join(",");
    seeded_rng(&["competitor", &name, &platforms])
}

fn platform_metrics(rng: &mut StdRng) -> CompetitorMetrics {
    CompetitorMetrics {
        followers: rng.gen_range(500..=10_000),
        engagement_rate: round_to(rng.gen_range(1.0..6.0), 2),
        posts_per_week: rng.gen_range(3..=15),
        avg_likes: rng.gen_range(50..=500),
        avg_comments: rng.gen_range(5..=50),
    }
}

/// Seeded metrics for each tracked platform. Stable for a given name and
/// handle set.
#[must_use]
pub fn estimate_metrics(competitor: &Competitor) -> BTreeMap<Platform, CompetitorMetrics> {
    let mut rng = rng_for(competitor);
    competitor
        .platforms
        .keys()
        .map(|platform| (*platform, platform_metrics(&mut rng)))
        .collect()
}

#[must_use]
pub fn analyze(competitor: &Competitor) -> CompetitorAnalysis {
    let metrics = estimate_metrics(competitor);
    // Separate stream so the strategy does not shift when handles change.
    let mut rng = seeded_rng(&["competitor_strategy", &competitor.name.trim().to_lowercase()]);

    let content_strategy = ContentStrategy {
        post_types: normalize(vec![
            ("images", rng.gen_range(40..=70)),
            ("videos", rng.gen_range(15..=35)),
            ("carousels", rng.gen_range(5..=20)),
            ("text", rng.gen_range(0..=15)),
        ]),
        top_topics: normalize(vec![
            ("product_showcase", rng.gen_range(20..=40)),
            ("behind_scenes", rng.gen_range(10..=25)),
            ("user_generated", rng.gen_range(5..=20)),
            ("educational", rng.gen_range(10..=30)),
            ("promotional", rng.gen_range(5..=25)),
        ]),
    };

    let posting_schedule = PostingSchedule {
        most_active_days: WEEKDAYS.choose_multiple(&mut rng, 3).copied().collect(),
        peak_hours: PEAK_HOURS.choose_multiple(&mut rng, 2).copied().collect(),
    };

    let insights = strategy_insights(&metrics, &content_strategy);
    CompetitorAnalysis {
        metrics,
        content_strategy,
        posting_schedule,
        insights,
    }
}

fn share_of(shares: &[Share], label: &str) -> f64 {
    shares
        .iter()
        .find(|share| share.label == label)
        .map_or(0.0, |share| share.percent)
}

fn strategy_insights(
    metrics: &BTreeMap<Platform, CompetitorMetrics>,
    strategy: &ContentStrategy,
) -> Vec<String> {
    let mut insights = Vec::new();

    if !metrics.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let average = metrics.values().map(|m| m.engagement_rate).sum::<f64>() / metrics.len() as f64;
        insights.push(
            if average > 4.0 {
                "Strong engagement across platforms"
            } else if average > 2.0 {
                "Moderate engagement with room for improvement"
            } else {
                "Low engagement suggests content optimization needed"
            }
            .to_string(),
        );
    }

    if share_of(&strategy.post_types, "videos") > 30.0 {
        insights.push("Heavy focus on video content".to_string());
    }
    if share_of(&strategy.post_types, "images") > 60.0 {
        insights.push("Image-heavy content strategy".to_string());
    }
    if let Some(top) = strategy
        .top_topics
        .iter()
        .max_by(|left, right| left.percent.total_cmp(&right.percent))
    {
        insights.push(format!(
            "Primary focus on {} content",
            top.label.replace('_', " ")
        ));
    }

    insights
}

/// One competitor's headline numbers in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub followers: u64,
    pub engagement_rate: f64,
    pub posts_per_day: f64,
    pub analyzed: bool,
}

/// Aggregates per-platform metrics: followers summed, engagement averaged,
/// weekly posts summed and expressed per day. Competitors that were never
/// analyzed use their seeded estimate.
#[must_use]
pub fn compare(competitors: &[Competitor]) -> Vec<ComparisonRow> {
    competitors
        .iter()
        .map(|competitor| {
            let analyzed = !competitor.metrics.is_empty();
            let metrics = if analyzed {
                competitor.metrics.clone()
            } else {
                estimate_metrics(competitor)
            };
            let followers = metrics.values().map(|m| m.followers).sum();
            #[allow(clippy::cast_precision_loss)]
            let engagement_rate = if metrics.is_empty() {
                0.0
            } else {
                round_to(
                    metrics.values().map(|m| m.engagement_rate).sum::<f64>() / metrics.len() as f64,
                    2,
                )
            };
            let weekly: u32 = metrics.values().map(|m| m.posts_per_week).sum();
            ComparisonRow {
                name: competitor.name.clone(),
                followers,
                engagement_rate,
                posts_per_day: round_to(f64::from(weekly) / 7.0, 1),
                analyzed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn competitor(name: &str, platforms: &[(Platform, &str)]) -> Competitor {
        Competitor {
            name: name.to_string(),
            platforms: platforms
                .iter()
                .map(|(platform, handle)| (*platform, (*handle).to_string()))
                .collect(),
            added_on: Utc::now(),
            last_analyzed: None,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn analysis_covers_each_platform_and_normalizes() {
        let acme = competitor("Acme", &[(Platform::Twitter, "@acme"), (Platform::Instagram, "@acme")]);
        let analysis = analyze(&acme);
        assert_eq!(
            analysis.metrics.keys().copied().collect::<Vec<_>>(),
            vec![Platform::Twitter, Platform::Instagram]
        );
        let total: f64 = analysis.content_strategy.post_types.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 0.5);
        assert_eq!(analysis.posting_schedule.most_active_days.len(), 3);
        assert!(analysis.insights.iter().any(|text| text.starts_with("Primary focus on")));
        assert_eq!(analysis, analyze(&acme));
    }

    #[test]
    fn name_case_does_not_change_estimates() {
        let lower = competitor("acme", &[(Platform::Linkedin, "acme-inc")]);
        let upper = competitor("ACME", &[(Platform::Linkedin, "acme-inc")]);
        assert_eq!(estimate_metrics(&lower), estimate_metrics(&upper));
    }

    #[test]
    fn compare_prefers_stored_metrics() {
        let mut analyzed = competitor("Acme", &[(Platform::Twitter, "@acme")]);
        analyzed.metrics.insert(
            Platform::Twitter,
            CompetitorMetrics {
                followers: 1_000,
                engagement_rate: 3.5,
                posts_per_week: 14,
                avg_likes: 100,
                avg_comments: 10,
            },
        );
        let fresh = competitor("Globex", &[]);

        let rows = compare(&[analyzed, fresh]);
        assert_eq!(rows[0].followers, 1_000);
        assert!((rows[0].posts_per_day - 2.0).abs() < f64::EPSILON);
        assert!(rows[0].analyzed);
        assert_eq!(rows[1].followers, 0);
        assert!(!rows[1].analyzed);
    }
}
