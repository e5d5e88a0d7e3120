use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use social_store::Platform;

use crate::ai::reply_lines;
use crate::features::GeneratedBy;
use crate::features::content::{
    CalendarEntry,
    MAX_CALENDAR_DAYS,
    SUGGESTIONS_PER_REQUEST,
    build_calendar,
    calendar_post_prompt,
    suggestion_prompt,
    template_suggestions,
};
use crate::params::{ContentType, parse_platform};

use super::{ControlError, SocialControlPlane, count_in_range, non_blank, required};

const DEFAULT_CALENDAR_DAYS: u32 = 7;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSuggestionRequest {
    pub platform: String,
    pub content_type: String,
    pub topic: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentSuggestionReport {
    pub platform: Platform,
    pub content_type: ContentType,
    pub topic: String,
    pub suggestions: Vec<String>,
    pub generated_by: GeneratedBy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentCalendarRequest {
    pub platform: String,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub focus_topics: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentCalendarReport {
    pub platform: Platform,
    pub total_days: u32,
    pub start_date: NaiveDate,
    pub focus_topics: Vec<String>,
    pub entries: Vec<CalendarEntry>,
    pub generated_by: GeneratedBy,
}

fn split_topics(raw: Option<&str>) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for topic in non_blank(raw)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
    {
        if !topics.iter().any(|known| known.eq_ignore_ascii_case(topic)) {
            topics.push(topic.to_string());
        }
    }
    topics
}

impl SocialControlPlane {
    /// Three post ideas for a platform, content type and topic.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` when a parameter is missing or
    /// unknown.
    pub async fn create_content_suggestion(
        &self,
        request: &ContentSuggestionRequest,
    ) -> Result<ContentSuggestionReport, ControlError> {
        let platform = parse_platform(required("platform", Some(request.platform.as_str()))?)?;
        let content_type: ContentType =
            required("content_type", Some(request.content_type.as_str()))?.parse()?;
        let topic = required("topic", Some(request.topic.as_str()))?;

        let from_ai = self
            .try_complete(
                "content_suggestion",
                &suggestion_prompt(platform, content_type, topic),
                500,
                0.8,
            )
            .await
            .map(|reply| {
                let mut lines = reply_lines(&reply);
                lines.truncate(SUGGESTIONS_PER_REQUEST);
                lines
            })
            .filter(|lines| !lines.is_empty());

        let (suggestions, generated_by) = match from_ai {
            Some(lines) => (lines, GeneratedBy::Ai),
            None => (
                template_suggestions(platform, content_type, topic),
                GeneratedBy::Template,
            ),
        };
        Ok(ContentSuggestionReport {
            platform,
            content_type,
            topic: topic.to_string(),
            suggestions,
            generated_by,
        })
    }

    /// A day-by-day plan starting today.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for an unknown platform or a day
    /// count outside `1..=30`.
    pub async fn create_content_calendar(
        &self,
        request: &ContentCalendarRequest,
    ) -> Result<ContentCalendarReport, ControlError> {
        let platform = parse_platform(required("platform", Some(request.platform.as_str()))?)?;
        let days = count_in_range("days", request.days, DEFAULT_CALENDAR_DAYS, MAX_CALENDAR_DAYS)?;
        let focus_topics = split_topics(request.focus_topics.as_deref());
        let start_date = Local::now().date_naive();

        let mut entries = build_calendar(platform, days, &focus_topics, start_date);
        let mut generated_by = GeneratedBy::Template;
        if self.ai_enabled() {
            for entry in &mut entries {
                let prompt = calendar_post_prompt(platform, entry.content_type, &entry.topic);
                if let Some(post) = self.try_complete("content_calendar", &prompt, 150, 0.7).await {
                    entry.suggested_post = post;
                    generated_by = GeneratedBy::Ai;
                }
            }
        }

        Ok(ContentCalendarReport {
            platform,
            total_days: days,
            start_date,
            focus_topics,
            entries,
            generated_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_topics_are_trimmed_and_deduplicated() {
        assert_eq!(
            split_topics(Some(" rust, Tokio ,,rust, tokio ")),
            vec!["rust".to_string(), "Tokio".to_string()]
        );
        assert!(split_topics(Some("   ")).is_empty());
        assert!(split_topics(None).is_empty());
    }
}
