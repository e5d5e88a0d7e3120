use serde::{Deserialize, Serialize};
use social_store::Platform;

use crate::features::GeneratedBy;
use crate::features::hashtags::{
    AdvancedHashtags,
    MAX_ADVANCED_HASHTAGS,
    MAX_RULE_HASHTAGS,
    advanced_hashtags,
    best_practices,
    hashtag_prompt,
    merge_ai_hashtags,
    reply_has_hashtags,
    rule_based_hashtags,
};
use crate::features::keywords::extract_keywords;
use crate::params::{HashtagStrategy, parse_platform};

use super::{ControlError, SocialControlPlane, count_in_range, keyword_or, non_blank, required};

const DEFAULT_COUNT: u32 = 10;
const REPORTED_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashtagRequest {
    pub content: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HashtagReport {
    pub platform: Platform,
    pub hashtags: Vec<String>,
    pub keywords: Vec<String>,
    pub best_practices: Vec<&'static str>,
    pub generated_by: GeneratedBy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedHashtagRequest {
    pub content: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedHashtagReport {
    pub platform: Platform,
    pub strategy: HashtagStrategy,
    #[serde(flatten)]
    pub result: AdvancedHashtags,
    pub generated_by: GeneratedBy,
}

fn platform_or_twitter(value: Option<&str>) -> Result<Platform, ControlError> {
    non_blank(value).map_or(Ok(Platform::Twitter), |raw| Ok(parse_platform(raw)?))
}

impl SocialControlPlane {
    /// Generates exactly `count` hashtags. Uses the AI client when configured
    /// and tops its answer up with rule-based tags.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for empty content, an unknown
    /// platform or a count outside `1..=20`.
    pub async fn generate_hashtags(
        &self,
        request: HashtagRequest,
    ) -> Result<HashtagReport, ControlError> {
        let content = required("content", Some(request.content.as_str()))?;
        let platform = platform_or_twitter(request.platform.as_deref())?;
        let count = count_in_range("count", request.count, DEFAULT_COUNT, MAX_RULE_HASHTAGS)? as usize;

        let rules = rule_based_hashtags(content, platform, count);
        let reply = self
            .try_complete("hashtags", &hashtag_prompt(content, platform, count), 200, 0.7)
            .await
            .filter(|reply| reply_has_hashtags(reply));
        let (hashtags, generated_by) = match reply {
            Some(reply) => (merge_ai_hashtags(&reply, &rules, count), GeneratedBy::Ai),
            None => (rules, GeneratedBy::Rules),
        };

        let mut keywords = extract_keywords(content);
        keywords.truncate(REPORTED_KEYWORDS);
        Ok(HashtagReport {
            platform,
            hashtags,
            keywords,
            best_practices: best_practices(platform).to_vec(),
            generated_by,
        })
    }

    /// Runs the strategy-driven hashtag engine.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for empty content, an unknown
    /// platform or strategy, or a count outside `1..=30`.
    #[allow(clippy::unused_self)]
    pub fn generate_advanced_hashtags(
        &self,
        request: &AdvancedHashtagRequest,
    ) -> Result<AdvancedHashtagReport, ControlError> {
        let content = required("content", Some(request.content.as_str()))?;
        let platform = platform_or_twitter(request.platform.as_deref())?;
        let count =
            count_in_range("count", request.count, DEFAULT_COUNT, MAX_ADVANCED_HASHTAGS)? as usize;
        let strategy = keyword_or(request.strategy.as_deref(), HashtagStrategy::Mixed)?;

        Ok(AdvancedHashtagReport {
            platform,
            strategy,
            result: advanced_hashtags(content, platform, count, strategy),
            generated_by: GeneratedBy::Rules,
        })
    }
}
