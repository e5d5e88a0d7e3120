//! Content ideas and tips derived from a trend list.

use social_store::TrendEntry;

use crate::params::TrendPlatform;

/// Five post ideas; the first three reference the top three topics.
#[must_use]
pub fn content_ideas(entries: &[TrendEntry]) -> Vec<String> {
    let topic = |index: usize, fallback: &str| {
        entries
            .get(index)
            .map_or_else(|| fallback.to_string(), |entry| entry.topic.clone())
    };
    vec![
        format!("Share your perspective on {}", topic(0, "current trends")),
        format!("Create a how-to guide related to {}", topic(1, "trending topics")),
        format!("Start a discussion about {}", topic(2, "industry trends")),
        "Share behind-the-scenes content related to trending topics".to_string(),
        "Create a poll asking your audience about their opinions on current trends".to_string(),
    ]
}

#[must_use]
pub const fn strategy_tips(platform: TrendPlatform) -> [&'static str; 4] {
    match platform {
        TrendPlatform::Twitter => [
            "Join trending conversations with thoughtful replies",
            "Use trending hashtags in your tweets",
            "Share quick takes on breaking news",
            "Retweet with added commentary",
        ],
        TrendPlatform::Instagram => [
            "Create visually appealing posts about trending topics",
            "Use trending hashtags in your posts",
            "Share Stories with trending stickers",
            "Create Reels about popular trends",
        ],
        TrendPlatform::General => [
            "Adapt trending topics to your niche",
            "Create educational content around trends",
            "Share your unique perspective on popular topics",
            "Engage with trending conversations authentically",
        ],
    }
}

pub const TIMING_TIPS: [&str; 4] = [
    "Post about trends while they're still hot (within 24-48 hours)",
    "Monitor trend velocity - some trends peak quickly",
    "Plan content calendar around predictable trends (holidays, events)",
    "Set up alerts for trends in your industry",
];
