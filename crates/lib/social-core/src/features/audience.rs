//! Audience insights. No platform exposes these through the configured
//! credentials, so every figure is seeded mock data.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use social_store::Platform;

use crate::seed::seeded_rng;

pub const GROWTH_PERIOD_DAYS: u32 = 30;
pub const ENGAGEMENT_PERIOD_DAYS: u32 = 7;
const TOP_POSTS: usize = 5;

/// A labelled percentage. Lists of shares keep their display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub age_groups: Vec<Share>,
    pub gender: Vec<Share>,
    pub locations: Vec<Share>,
    pub total_followers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowerGrowth {
    pub period_days: u32,
    pub follower_count: u32,
    pub total: u32,
    pub percentage: f64,
    pub average_daily: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub kind: &'static str,
    pub average: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPost {
    pub post_id: String,
    pub content_type: &'static str,
    pub engagement_rate: f64,
    pub reach: u32,
    pub impressions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementInsights {
    pub period_days: u32,
    pub total_posts: u32,
    pub interactions: Vec<Interaction>,
    pub engagement_rate: f64,
    pub average_reach: u32,
    pub top_posts: Vec<TopPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceReport {
    pub demographics: Demographics,
    pub growth: FollowerGrowth,
    pub engagement: EngagementInsights,
    pub insights: Vec<String>,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Scales raw weights to percentages rounded to one decimal place.
pub(crate) fn normalize(raw: Vec<(&'static str, u32)>) -> Vec<Share> {
    let total: u32 = raw.iter().map(|(_, weight)| weight).sum();
    raw.into_iter()
        .map(|(label, weight)| Share {
            label,
            percent: if total == 0 {
                0.0
            } else {
                round_to(f64::from(weight) * 100.0 / f64::from(total), 1)
            },
        })
        .collect()
}

fn rng_for(platform: Platform, section: &str) -> StdRng {
    seeded_rng(&["audience", platform.as_str(), section])
}

#[must_use]
pub fn demographics(platform: Platform) -> Demographics {
    let mut rng = rng_for(platform, "demographics");

    let age_groups = normalize(vec![
        ("18-24", rng.gen_range(15..=35)),
        ("25-34", rng.gen_range(25..=45)),
        ("35-44", rng.gen_range(15..=30)),
        ("45-54", rng.gen_range(5..=20)),
        ("55+", rng.gen_range(2..=15)),
    ]);

    let female: u32 = rng.gen_range(45..=65);
    let other: u32 = rng.gen_range(1..=5);
    let gender = vec![
        Share {
            label: "Female",
            percent: f64::from(female),
        },
        Share {
            label: "Male",
            percent: f64::from(100 - female - other),
        },
        Share {
            label: "Other",
            percent: f64::from(other),
        },
    ];

    let locations = normalize(vec![
        ("United States", rng.gen_range(25..=40)),
        ("India", rng.gen_range(15..=30)),
        ("United Kingdom", rng.gen_range(8..=15)),
        ("Canada", rng.gen_range(5..=12)),
        ("Australia", rng.gen_range(3..=8)),
        ("Others", rng.gen_range(5..=20)),
    ]);

    Demographics {
        age_groups,
        gender,
        locations,
        total_followers: rng.gen_range(800..=5_000),
    }
}

#[must_use]
pub fn follower_growth(platform: Platform) -> FollowerGrowth {
    let mut rng = rng_for(platform, "growth");
    let follower_count: u32 = rng.gen_range(800..=3_000);
    let rate: f64 = rng.gen_range(1.5..8.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = (f64::from(follower_count) * rate / 100.0) as u32;
    FollowerGrowth {
        period_days: GROWTH_PERIOD_DAYS,
        follower_count,
        total,
        percentage: round_to(rate, 1),
        average_daily: round_to(f64::from(total) / f64::from(GROWTH_PERIOD_DAYS), 1),
    }
}

const fn interaction_baseline(platform: Platform) -> [(&'static str, u32); 4] {
    match platform {
        Platform::Instagram => [("likes", 150), ("comments", 25), ("shares", 8), ("saves", 12)],
        Platform::Twitter => [("likes", 45), ("retweets", 12), ("replies", 8), ("quotes", 3)],
        Platform::Facebook => [("likes", 80), ("comments", 15), ("shares", 6), ("reactions", 20)],
        Platform::Linkedin => [("likes", 35), ("comments", 12), ("shares", 5), ("reactions", 8)],
    }
}

const POST_FORMATS: [&str; 4] = ["image", "video", "carousel", "text"];

#[must_use]
pub fn engagement(platform: Platform) -> EngagementInsights {
    let mut rng = rng_for(platform, "engagement");

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let interactions: Vec<Interaction> = interaction_baseline(platform)
        .into_iter()
        .map(|(kind, base)| Interaction {
            kind,
            average: (f64::from(base) * rng.gen_range(0.7..1.4)) as u32,
        })
        .collect();
    let total: u32 = interactions.iter().map(|interaction| interaction.average).sum();
    let average_reach: u32 = rng.gen_range(1_000..=5_000);
    let total_posts = rng.gen_range(10..=50);

    let mut top_posts: Vec<TopPost> = (1..=TOP_POSTS)
        .map(|index| TopPost {
            post_id: format!("post_{index}"),
            content_type: POST_FORMATS.choose(&mut rng).copied().unwrap_or("image"),
            engagement_rate: round_to(rng.gen_range(2.5..8.0), 2),
            reach: rng.gen_range(500..=3_000),
            impressions: rng.gen_range(800..=5_000),
        })
        .collect();
    top_posts.sort_by(|left, right| right.engagement_rate.total_cmp(&left.engagement_rate));

    EngagementInsights {
        period_days: ENGAGEMENT_PERIOD_DAYS,
        total_posts,
        interactions,
        engagement_rate: round_to(f64::from(total) / f64::from(average_reach) * 100.0, 2),
        average_reach,
        top_posts,
    }
}

/// Plain-language observations drawn from the three sections.
#[must_use]
pub fn summarize(
    demographics: &Demographics,
    growth: &FollowerGrowth,
    engagement: &EngagementInsights,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(dominant) = demographics
        .age_groups
        .iter()
        .max_by(|left, right| left.percent.total_cmp(&right.percent))
    {
        insights.push(format!(
            "Your primary audience is {} age group ({}%)",
            dominant.label, dominant.percent
        ));
    }

    insights.push(
        if growth.percentage > 5.0 {
            "Excellent follower growth rate indicates strong content resonance"
        } else if growth.percentage > 2.0 {
            "Steady growth - consider increasing posting frequency"
        } else {
            "Growth could be improved with more engaging content"
        }
        .to_string(),
    );

    insights.push(
        if engagement.engagement_rate > 4.0 {
            "High engagement rate shows strong audience connection"
        } else if engagement.engagement_rate > 2.0 {
            "Good engagement - focus on replicating top-performing content"
        } else {
            "Consider optimizing posting times and content strategy"
        }
        .to_string(),
    );

    insights
}

#[must_use]
pub fn report(platform: Platform) -> AudienceReport {
    let demographics = demographics(platform);
    let growth = follower_growth(platform);
    let engagement = engagement(platform);
    let insights = summarize(&demographics, &growth, &engagement);
    AudienceReport {
        demographics,
        growth,
        engagement,
        insights,
    }
}
