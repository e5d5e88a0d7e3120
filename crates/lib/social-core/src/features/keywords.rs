//! Word splitting, keyword extraction and a naive sentiment score.

use serde::Serialize;

/// Ignored during keyword extraction.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old",
    "see", "two", "who", "boy", "did", "she", "use", "way", "will", "with", "this", "that",
    "they",
];

pub const MAX_KEYWORDS: usize = 10;

/// Lowercased words made purely of ASCII letters.
///
/// A word is a maximal run of alphanumeric characters or underscores; runs
/// containing digits, underscores or non-ASCII letters are dropped whole.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|run| !run.is_empty() && run.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Content keywords: words longer than three letters that are not stop
/// words, de-duplicated in order of first appearance.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in words(text) {
        if word.len() <= 3 || STOP_WORDS.contains(&word.as_str()) || keywords.contains(&word) {
            continue;
        }
        keywords.push(word);
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "amazing", "awesome", "love", "best", "perfect", "excellent",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "hate", "worst", "awful", "horrible", "disappointing",
];

/// Counts marker substrings on each side; ties are neutral.
#[must_use]
pub fn sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
