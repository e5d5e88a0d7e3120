//! Hashtag generation: the rule-based generator behind `generate_hashtags`
//! and the strategy-driven engine behind `generate_advanced_hashtags`.

use rand::seq::SliceRandom;
use serde::Serialize;
use social_store::Platform;

use super::keywords::{Sentiment, extract_keywords, sentiment, words};
use crate::params::HashtagStrategy;
use crate::seed::seeded_rng;

pub const MAX_RULE_HASHTAGS: u32 = 20;
pub const MAX_ADVANCED_HASHTAGS: u32 = 30;

/// Keyword tags placed ahead of the category tables.
const KEYWORD_TAGS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Business,
    Technology,
    Lifestyle,
    Social,
}

impl Category {
    const ORDER: [Self; 4] = [Self::Business, Self::Technology, Self::Lifestyle, Self::Social];

    const fn index(self) -> usize {
        self as usize
    }
}

const TECH_WORDS: &[&str] = &[
    "tech", "digital", "software", "app", "code", "data", "ai", "machine", "learning",
];
const LIFESTYLE_WORDS: &[&str] = &["life", "health", "fitness", "food", "travel", "style", "home"];
const SOCIAL_WORDS: &[&str] = &["social", "media", "content", "post", "share", "follow", "like"];

fn detect_category(tokens: &[String]) -> Category {
    let has_any = |table: &[&str]| tokens.iter().any(|token| table.contains(&token.as_str()));
    if has_any(TECH_WORDS) {
        Category::Technology
    } else if has_any(LIFESTYLE_WORDS) {
        Category::Lifestyle
    } else if has_any(SOCIAL_WORDS) {
        Category::Social
    } else {
        Category::Business
    }
}

/// Tag tables indexed by [`Category::index`]. Every platform's twenty tags
/// are distinct, so any count up to twenty can always be filled.
const fn category_tags(platform: Platform) -> [[&'static str; 5]; 4] {
    match platform {
        Platform::Twitter => [
            ["#business", "#entrepreneur", "#startup", "#success", "#marketing"],
            ["#tech", "#innovation", "#AI", "#digital", "#future"],
            ["#lifestyle", "#motivation", "#inspiration", "#wellness", "#mindset"],
            ["#socialmedia", "#content", "#engagement", "#community", "#brand"],
        ],
        Platform::Instagram => [
            ["#businessowner", "#entrepreneurlife", "#hustle", "#businesstips", "#success"],
            ["#technology", "#innovation", "#techlife", "#digital", "#startup"],
            ["#lifestyleblogger", "#dailylife", "#inspiration", "#motivation", "#wellness"],
            ["#socialmediamarketing", "#contentcreator", "#influencer", "#brand", "#marketing"],
        ],
        Platform::Linkedin => [
            ["#business", "#leadership", "#professional", "#career", "#networking"],
            ["#technology", "#innovation", "#digitaltransformation", "#AI", "#tech"],
            ["#worklifebalance", "#productivity", "#growth", "#development", "#success"],
            ["#socialmedia", "#marketing", "#branding", "#content", "#strategy"],
        ],
        Platform::Facebook => [
            ["#smallbusiness", "#shoplocal", "#entrepreneur", "#businessgrowth", "#supportsmall"],
            ["#technews", "#gadgets", "#innovation", "#techtips", "#digital"],
            ["#family", "#weekendvibes", "#healthyliving", "#inspiration", "#community"],
            ["#facebooklive", "#sharethis", "#friends", "#events", "#news"],
        ],
    }
}

#[must_use]
pub const fn best_practices(platform: Platform) -> [&'static str; 3] {
    match platform {
        Platform::Twitter => [
            "Keep hashtags concise and relevant",
            "Use 1-3 hashtags per tweet",
            "Mix trending and niche hashtags",
        ],
        Platform::Instagram => [
            "Use up to 30 hashtags for maximum reach",
            "Mix popular and niche hashtags",
            "Place hashtags in comments or at end of caption",
        ],
        Platform::Linkedin => [
            "Use 3-5 professional hashtags",
            "Focus on industry-relevant tags",
            "Avoid overly casual hashtags",
        ],
        Platform::Facebook => [
            "Use 1-2 hashtags sparingly",
            "Focus on branded or campaign hashtags",
            "Hashtags are less important on Facebook",
        ],
    }
}

/// Appends tags not already present, comparing case-insensitively.
fn push_unique(target: &mut Vec<String>, candidates: impl IntoIterator<Item = String>) {
    for candidate in candidates {
        if !target
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&candidate))
        {
            target.push(candidate);
        }
    }
}

/// Normalizes a raw tag to `#word` form. Returns `None` for empty input.
fn as_hashtag(raw: &str) -> Option<String> {
    let body = raw.trim().trim_start_matches('#');
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if body.is_empty() {
        None
    } else {
        Some(format!("#{body}"))
    }
}

/// Rule-based tags: up to three keyword tags, then the detected category's
/// tags, then every other category, de-duplicated and cut to `count`.
#[must_use]
pub fn rule_based_hashtags(content: &str, platform: Platform, count: usize) -> Vec<String> {
    let keywords = extract_keywords(content);
    let category = detect_category(&words(content));
    let tables = category_tags(platform);

    let mut tags = Vec::new();
    push_unique(
        &mut tags,
        keywords
            .iter()
            .take(KEYWORD_TAGS)
            .filter_map(|keyword| as_hashtag(keyword)),
    );
    push_unique(
        &mut tags,
        tables[category.index()].iter().map(ToString::to_string),
    );
    for other in Category::ORDER.into_iter().filter(|other| *other != category) {
        push_unique(&mut tags, tables[other.index()].iter().map(ToString::to_string));
    }
    tags.truncate(count);
    tags
}

#[must_use]
pub fn hashtag_prompt(content: &str, platform: Platform, count: usize) -> String {
    format!(
        "Generate {count} relevant and popular hashtags for this {platform} post:\n\n\
         \"{content}\"\n\n\
         Requirements:\n\
         - Return only hashtags, one per line\n\
         - Include the # symbol\n\
         - Make them relevant to the content\n\
         - Consider {platform} best practices\n\
         - Mix popular and niche hashtags"
    )
}

/// Merges an AI reply with the rule-based tags so the result always has
/// exactly `count` entries. Lines that do not start with `#` are ignored.
#[must_use]
pub fn merge_ai_hashtags(reply: &str, fallback: &[String], count: usize) -> Vec<String> {
    let mut tags = Vec::new();
    push_unique(
        &mut tags,
        reply
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with('#'))
            .filter_map(as_hashtag),
    );
    tags.truncate(count);
    push_unique(&mut tags, fallback.iter().cloned());
    tags.truncate(count);
    tags
}

/// Whether the AI reply carried any usable tag at all.
#[must_use]
pub fn reply_has_hashtags(reply: &str) -> bool {
    reply
        .lines()
        .any(|line| line.trim().starts_with('#') && line.trim().len() > 1)
}

// Strategy-driven engine.

const fn trending_tags(platform: Platform) -> [&'static str; 10] {
    match platform {
        Platform::Twitter => [
            "#trending", "#news", "#today", "#breaking", "#viral", "#discussion", "#opinion",
            "#tech", "#business", "#life",
        ],
        Platform::Linkedin => [
            "#leadership", "#innovation", "#business", "#career", "#professional",
            "#networking", "#growth", "#success", "#strategy", "#development",
        ],
        Platform::Instagram | Platform::Facebook => [
            "#instagood", "#photooftheday", "#love", "#instadaily", "#picoftheday",
            "#instagram", "#followme", "#instamood", "#style", "#happy",
        ],
    }
}

/// Topics the engine can recognise, in priority order.
const TOPIC_WORDS: &[(&str, &[&str])] = &[
    (
        "mythology",
        &["myth", "god", "goddess", "legend", "ancient", "hero", "story", "folklore"],
    ),
    (
        "technology",
        &["tech", "digital", "software", "app", "code", "data", "ai", "innovation"],
    ),
    (
        "business",
        &["business", "entrepreneur", "startup", "success", "marketing", "growth"],
    ),
    (
        "lifestyle",
        &["life", "health", "fitness", "food", "travel", "style", "home", "wellness"],
    ),
    (
        "education",
        &["learn", "education", "study", "knowledge", "skill", "training", "course"],
    ),
];

pub const GENERAL_TOPIC: &str = "general";

/// Picks the first topic with a matching word. Short markers must match a
/// whole word; markers of four letters or more also match as a word prefix
/// (`myth` matches `mythology`).
#[must_use]
pub fn identify_topic(tokens: &[String]) -> &'static str {
    TOPIC_WORDS
        .iter()
        .find(|(_, markers)| {
            markers.iter().any(|marker| {
                tokens.iter().any(|token| {
                    token == marker || (marker.len() >= 4 && token.starts_with(marker))
                })
            })
        })
        .map_or(GENERAL_TOPIC, |(topic, _)| *topic)
}

fn niche_tags(topic: &str, platform: Platform) -> Vec<String> {
    let table: Option<[&str; 5]> = match (topic, platform) {
        ("mythology", Platform::Instagram) => Some([
            "#mythology", "#ancientmyths", "#greekmythology", "#norsemythology", "#legends",
        ]),
        ("mythology", Platform::Twitter) => {
            Some(["#mythology", "#myths", "#ancientstories", "#folklore", "#legends"])
        }
        ("mythology", Platform::Linkedin) => Some([
            "#culturalheritage", "#storytelling", "#history", "#mythology", "#education",
        ]),
        ("technology", Platform::Instagram) => {
            Some(["#tech", "#innovation", "#gadgets", "#AI", "#future"])
        }
        ("technology", Platform::Twitter) => {
            Some(["#tech", "#innovation", "#AI", "#coding", "#startup"])
        }
        ("technology", Platform::Linkedin) => Some([
            "#technology", "#innovation", "#digitaltransformation", "#AI", "#tech",
        ]),
        ("business", Platform::Instagram) => {
            Some(["#business", "#entrepreneur", "#startup", "#success", "#hustle"])
        }
        ("business", Platform::Twitter) => {
            Some(["#business", "#entrepreneur", "#startup", "#growth", "#strategy"])
        }
        ("business", Platform::Linkedin) => {
            Some(["#business", "#leadership", "#strategy", "#growth", "#innovation"])
        }
        _ => None,
    };
    table.map_or_else(
        || {
            vec![
                format!("#{topic}"),
                format!("#{topic}community"),
                format!("#{topic}lovers"),
                format!("#{topic}tips"),
            ]
        },
        |tags| tags.iter().map(ToString::to_string).collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    High,
    Medium,
    Low,
}

/// Longer tags face less competition.
#[must_use]
pub fn difficulty(tag: &str) -> Difficulty {
    match tag.chars().count() {
        0..=15 => Difficulty::High,
        16..=20 => Difficulty::Medium,
        _ => Difficulty::Low,
    }
}

#[must_use]
pub const fn recommendations(platform: Platform) -> [&'static str; 3] {
    match platform {
        Platform::Twitter => [
            "Use 1-2 hashtags per tweet",
            "Focus on trending and relevant hashtags",
            "Keep hashtags short and memorable",
        ],
        Platform::Linkedin => [
            "Use 3-5 professional hashtags",
            "Focus on industry-relevant tags",
            "Avoid overly casual hashtags",
        ],
        Platform::Facebook => [
            "Use 1-2 hashtags sparingly",
            "Focus on branded or campaign hashtags",
            "Hashtags are less important on Facebook",
        ],
        Platform::Instagram => [
            "Use 20-30 hashtags for maximum reach",
            "Mix popular and niche hashtags",
            "Place hashtags in comments to keep captions clean",
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedHashtag {
    pub hashtag: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentAnalysis {
    pub keywords: Vec<String>,
    pub topic: &'static str,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedHashtags {
    pub hashtags: Vec<RankedHashtag>,
    pub analysis: ContentAnalysis,
    pub recommendations: Vec<&'static str>,
}

/// Runs the strategy engine. The trending sample is seeded from the request,
/// so identical calls pick identical tags. Strategies backed by short tables
/// may return fewer than `count` tags.
#[must_use]
pub fn advanced_hashtags(
    content: &str,
    platform: Platform,
    count: usize,
    strategy: HashtagStrategy,
) -> AdvancedHashtags {
    let keywords = extract_keywords(content);
    let topic = identify_topic(&words(content));
    let count_text = count.to_string();
    let mut rng = seeded_rng(&[
        "advanced_hashtags",
        content,
        platform.as_str(),
        strategy.as_str(),
        &count_text,
    ]);

    let mut trending = |take: usize| -> Vec<String> {
        trending_tags(platform)
            .choose_multiple(&mut rng, take)
            .map(ToString::to_string)
            .collect()
    };
    let branded = |take: usize| -> Vec<String> {
        keywords
            .iter()
            .take(take)
            .map(|keyword| format!("#{keyword}"))
            .collect()
    };

    let tags = match strategy {
        HashtagStrategy::Trending => trending(count),
        HashtagStrategy::Niche => niche_tags(topic, platform).into_iter().take(count).collect(),
        HashtagStrategy::Branded => branded(count),
        HashtagStrategy::Mixed => {
            let share = (count * 40 / 100).max(1);
            let mut tags = Vec::new();
            push_unique(&mut tags, trending(share));
            push_unique(&mut tags, niche_tags(topic, platform).into_iter().take(share));
            let remaining = count.saturating_sub(tags.len());
            push_unique(&mut tags, branded(remaining));
            tags.truncate(count);
            tags
        }
    };

    AdvancedHashtags {
        hashtags: tags
            .into_iter()
            .map(|hashtag| RankedHashtag {
                difficulty: difficulty(&hashtag),
                hashtag,
            })
            .collect(),
        analysis: ContentAnalysis {
            keywords,
            topic,
            sentiment: sentiment(content),
        },
        recommendations: recommendations(platform).to_vec(),
    }
}
