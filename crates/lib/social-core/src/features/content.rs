//! Template-based post suggestions and content calendars.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use serde::Serialize;
use social_store::Platform;

use crate::params::ContentType;
use crate::seed::seeded_rng;

pub const SUGGESTIONS_PER_REQUEST: usize = 3;
pub const MAX_CALENDAR_DAYS: u32 = 30;

const DEFAULT_TOPICS: [&str; 7] = [
    "business",
    "technology",
    "lifestyle",
    "motivation",
    "tips",
    "trends",
    "success",
];

/// Order content types rotate through across calendar days.
const CALENDAR_ROTATION: [ContentType; 4] = [
    ContentType::Engagement,
    ContentType::Informative,
    ContentType::Promotional,
    ContentType::Trending,
];

/// Post templates with a `{topic}` placeholder. Facebook shares the
/// Instagram set.
const fn templates(platform: Platform, content_type: ContentType) -> [&'static str; 5] {
    match (platform, content_type) {
        (Platform::Instagram | Platform::Facebook, ContentType::Engagement) => [
            "🔥 What's your favorite {topic} story? Drop it in the comments! 👇",
            "✨ {topic} fact: Did you know... Share if this blew your mind! 🤯",
            "💭 If you could experience one {topic} adventure, which would it be?",
            "🎨 Tag someone who loves {topic} as much as you do! 💫",
            "🌟 Double tap if {topic} fascinates you! What draws you to it?",
        ],
        (Platform::Instagram | Platform::Facebook, ContentType::Informative) => [
            "📚 {topic} Deep Dive: Let's explore the fascinating world of...",
            "🔍 Breaking down {topic}: Here's what you need to know...",
            "💡 {topic} Explained: Understanding the basics and beyond...",
            "📖 The Ultimate {topic} Guide: Everything you've ever wondered...",
            "🎓 {topic} 101: Your beginner's guide to understanding...",
        ],
        (Platform::Instagram | Platform::Facebook, ContentType::Promotional) => [
            "🚀 Ready to dive deeper into {topic}? Check out our latest...",
            "💯 Loving {topic}? You'll absolutely adore this...",
            "✨ For all {topic} enthusiasts, we've got something special...",
            "🔥 New {topic} content alert! Don't miss out on...",
            "🎯 {topic} lovers, this one's for you! Discover...",
        ],
        (Platform::Instagram | Platform::Facebook, ContentType::Trending) => [
            "🔥 Everyone's talking about {topic} right now! Here's why...",
            "📈 {topic} is trending and we're here for it! Let's discuss...",
            "💫 Joining the {topic} conversation with our take on...",
            "🌟 The {topic} trend explained: What it means and why it matters...",
            "⚡ Riding the {topic} wave! Here's our perspective on...",
        ],
        (Platform::Twitter, ContentType::Engagement) => [
            "Hot take on {topic}: [Your opinion here] What do you think? 🧵",
            "Quick {topic} poll: Which side are you on? Vote below! 👇",
            "Unpopular {topic} opinion: [Share your take] Change my mind 💭",
            "{topic} enthusiasts, assemble! What's your favorite aspect? 🔥",
            "Real talk about {topic}: [Your insight] Who agrees? 🙋",
        ],
        (Platform::Twitter, ContentType::Informative) => [
            "🧵 {topic} thread: Everything you need to know (1/n)",
            "Breaking: New developments in {topic} that will change everything",
            "📊 {topic} by the numbers: Here are the facts that matter",
            "💡 {topic} tip of the day: [Share valuable insight]",
            "🔍 Deep dive into {topic}: The complete breakdown",
        ],
        (Platform::Twitter, ContentType::Promotional) => [
            "🚀 Launching our new {topic} resource! Check it out: [link]",
            "📢 Attention {topic} fans! We've got something special for you",
            "💯 Our {topic} guide just dropped! Everything you need: [link]",
            "🎯 For {topic} lovers: Don't miss our latest update",
            "✨ New {topic} content is live! Dive in: [link]",
        ],
        (Platform::Twitter, ContentType::Trending) => [
            "Why {topic} is trending and what it means for you 🧵",
            "Joining the {topic} conversation with our take 👇",
            "The {topic} trend explained in under 60 seconds ⏰",
            "Everyone's talking {topic} - here's our perspective 💭",
            "Breaking down the {topic} phenomenon 📈",
        ],
        (Platform::Linkedin, ContentType::Engagement) => [
            "What's your experience with {topic}? I'd love to hear your insights in the comments.",
            "Here's an interesting perspective on {topic}. What are your thoughts?",
            "I've been reflecting on {topic} lately. What challenges have you faced?",
            "Let's discuss {topic}: What trends are you seeing in your industry?",
            "Curious about your take on {topic}. How has it impacted your work?",
        ],
        (Platform::Linkedin, ContentType::Informative) => [
            "5 key insights about {topic} that every professional should know",
            "The future of {topic}: What to expect in the next 5 years",
            "How {topic} is transforming the way we work: A comprehensive analysis",
            "Understanding {topic}: A guide for business leaders",
            "The impact of {topic} on modern workplace dynamics",
        ],
        (Platform::Linkedin, ContentType::Promotional) => [
            "Excited to share our latest insights on {topic}. Check out our new resource:",
            "We've been working on something special for {topic} professionals:",
            "Proud to announce our new {topic} initiative. Learn more:",
            "For those interested in {topic}, we've created a comprehensive guide:",
            "Our team has been researching {topic}. Here's what we found:",
        ],
        (Platform::Linkedin, ContentType::Trending) => [
            "Why {topic} is dominating industry conversations right now",
            "The {topic} trend: What it means for business leaders",
            "Breaking down the {topic} phenomenon and its implications",
            "How the {topic} movement is reshaping our industry",
            "Understanding the {topic} trend: Opportunities and challenges",
        ],
    }
}

const fn platform_guidelines(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Visual, engaging, use emojis, hashtag-friendly, storytelling",
        Platform::Twitter => "Concise, conversational, thread-worthy, trending-aware",
        Platform::Linkedin => "Professional, insightful, business-focused, thought leadership",
        Platform::Facebook => "Community-focused, shareable, conversation-starting",
    }
}

const fn posting_times(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Instagram => &["9:00 AM", "2:00 PM", "5:00 PM"],
        Platform::Twitter => &["8:00 AM", "12:00 PM", "3:00 PM", "7:00 PM"],
        Platform::Linkedin => &["8:00 AM", "12:00 PM", "1:00 PM", "5:00 PM"],
        Platform::Facebook => &["9:00 AM", "1:00 PM", "3:00 PM"],
    }
}

/// Three distinct templates for the request, chosen with an RNG seeded from
/// the request, with the topic substituted in.
#[must_use]
pub fn template_suggestions(
    platform: Platform,
    content_type: ContentType,
    topic: &str,
) -> Vec<String> {
    let mut rng = seeded_rng(&["suggestion", platform.as_str(), content_type.as_str(), topic]);
    templates(platform, content_type)
        .choose_multiple(&mut rng, SUGGESTIONS_PER_REQUEST)
        .map(|template| template.replace("{topic}", topic))
        .collect()
}

#[must_use]
pub fn suggestion_prompt(platform: Platform, content_type: ContentType, topic: &str) -> String {
    let guidelines = platform_guidelines(platform);
    format!(
        "Create 3 {content_type} social media posts for {platform} about {topic}.\n\n\
         Platform guidelines: {guidelines}\n\n\
         Requirements:\n\
         - Make them {content_type} and engaging\n\
         - Include relevant emojis where appropriate\n\
         - Keep platform character limits in mind\n\
         - Make them actionable and shareable\n\
         - Focus on {topic}\n\n\
         Return 3 different post ideas, each on a new line."
    )
}

/// Prompt for a single calendar post.
#[must_use]
pub fn calendar_post_prompt(platform: Platform, content_type: ContentType, topic: &str) -> String {
    let guidelines = platform_guidelines(platform);
    format!(
        "Write one {content_type} social media post for {platform} about {topic}.\n\
         Platform guidelines: {guidelines}\n\
         Return only the post text."
    )
}

/// One planned post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    pub day: u32,
    pub date: NaiveDate,
    pub content_type: ContentType,
    pub topic: String,
    pub suggested_post: String,
    pub best_time: &'static str,
}

/// Lays out `days` entries starting at `start`. Content types rotate, topics
/// and posting times are drawn from an RNG seeded by the platform, the day
/// count and the focus topics.
#[must_use]
pub fn build_calendar(
    platform: Platform,
    days: u32,
    focus_topics: &[String],
    start: NaiveDate,
) -> Vec<CalendarEntry> {
    let topics: Vec<String> = if focus_topics.is_empty() {
        DEFAULT_TOPICS.iter().map(ToString::to_string).collect()
    } else {
        focus_topics.to_vec()
    };
    let days_text = days.to_string();
    let topics_text = topics.join(",");
    let mut rng = seeded_rng(&["calendar", platform.as_str(), &days_text, &topics_text]);
    let times = posting_times(platform);

    (1..=days)
        .zip(CALENDAR_ROTATION.iter().cycle())
        .map(|(day, content_type)| {
            let topic = topics.choose(&mut rng).cloned().unwrap_or_default();
            let best_time = times.choose(&mut rng).copied().unwrap_or("12:00 PM");
            let suggested_post = template_suggestions(platform, *content_type, &topic)
                .into_iter()
                .next()
                .unwrap_or_else(|| format!("Create {content_type} content about {topic}"));
            CalendarEntry {
                day,
                date: start
                    .checked_add_days(Days::new(u64::from(day - 1)))
                    .unwrap_or(start),
                content_type: *content_type,
                topic,
                suggested_post,
                best_time,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_substitute_topic_and_are_stable() {
        let first = template_suggestions(Platform::Twitter, ContentType::Trending, "Rust");
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|text| text.contains("Rust") && !text.contains("{topic}")));
        assert_eq!(
            first,
            template_suggestions(Platform::Twitter, ContentType::Trending, "Rust")
        );
    }

    #[test]
    fn facebook_uses_instagram_templates() {
        let facebook = template_suggestions(Platform::Facebook, ContentType::Promotional, "tea");
        let pool: Vec<String> = templates(Platform::Instagram, ContentType::Promotional)
            .iter()
            .map(|template| template.replace("{topic}", "tea"))
            .collect();
        assert!(facebook.iter().all(|text| pool.contains(text)));
    }

    #[test]
    fn calendar_rotates_types_and_dates() {
        let start = NaiveDate::from_ymd_opt(2030, 1, 30).expect("date");
        let topics = vec!["rust".to_string(), "tokio".to_string()];
        let calendar = build_calendar(Platform::Linkedin, 6, &topics, start);

        assert_eq!(calendar.len(), 6);
        let types: Vec<ContentType> = calendar.iter().map(|entry| entry.content_type).collect();
        assert_eq!(
            types,
            vec![
                ContentType::Engagement,
                ContentType::Informative,
                ContentType::Promotional,
                ContentType::Trending,
                ContentType::Engagement,
                ContentType::Informative,
            ]
        );
        assert_eq!(calendar[2].date, NaiveDate::from_ymd_opt(2030, 2, 1).expect("date"));
        assert!(calendar.iter().all(|entry| topics.contains(&entry.topic)));
        assert!(
            calendar
                .iter()
                .all(|entry| posting_times(Platform::Linkedin).contains(&entry.best_time))
        );
    }

    #[test]
    fn calendar_defaults_topics() {
        let start = NaiveDate::from_ymd_opt(2030, 1, 1).expect("date");
        let calendar = build_calendar(Platform::Twitter, 3, &[], start);
        assert!(
            calendar
                .iter()
                .all(|entry| DEFAULT_TOPICS.contains(&entry.topic.as_str()))
        );
    }
}
