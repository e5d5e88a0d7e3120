use std::{error::Error, fmt};

use tracing::warn;

use crate::ai::CompletionClient;
use crate::params::InvalidParam;
use crate::platforms::PlatformAdapter;
use crate::store::{JsonDocStore, StoreError};

pub mod analytics;
pub mod audience;
pub mod competitors;
pub mod content;
pub mod hashtags;
pub mod posts;
pub mod trends;

pub use analytics::{AnalyticsReport, AnalyticsRequest};
pub use audience::{AudienceInsightsReport, AudienceRequest};
pub use competitors::{CompetitorReport, CompetitorRequest};
pub use content::{
    ContentCalendarReport,
    ContentCalendarRequest,
    ContentSuggestionReport,
    ContentSuggestionRequest,
};
pub use hashtags::{
    AdvancedHashtagReport,
    AdvancedHashtagRequest,
    HashtagReport,
    HashtagRequest,
};
pub use posts::{ManagePostsReport, ManagePostsRequest, SchedulePostRequest, ScheduledPostReport};
pub use trends::{TrendsReport, TrendsRequest};

#[derive(Debug)]
pub enum ControlError {
    Validation(String),
    NotFound(String),
    Store(StoreError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) | Self::NotFound(message) => f.write_str(message),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvalidParam> for ControlError {
    fn from(err: InvalidParam) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for ControlError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Entry point for every tool operation.
///
/// Cheap to clone: the store, adapter and AI client all share their
/// underlying state.
#[derive(Clone)]
pub struct SocialControlPlane {
    store: JsonDocStore,
    adapter: PlatformAdapter,
    ai: Option<CompletionClient>,
}

impl SocialControlPlane {
    #[must_use]
    pub const fn new(store: JsonDocStore, adapter: PlatformAdapter) -> Self {
        Self {
            store,
            adapter,
            ai: None,
        }
    }

    #[must_use]
    pub fn with_ai(mut self, ai: CompletionClient) -> Self {
        self.ai = Some(ai);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &JsonDocStore {
        &self.store
    }

    #[must_use]
    pub const fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    /// Runs a completion if a client is configured. Failures are logged and
    /// reported as `None` so callers fall back to heuristics.
    async fn try_complete(
        &self,
        purpose: &'static str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Option<String> {
        let ai = self.ai.as_ref()?;
        match ai.complete(prompt, max_tokens, temperature).await {
            Ok(reply) => Some(reply),
            Err(err) => {
                warn!(purpose, "AI completion failed, using heuristics: {err}");
                None
            }
        }
    }
}

/// Trims the value and treats blank strings as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub(crate) fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ControlError> {
    non_blank(value).ok_or_else(|| ControlError::Validation(format!("{name} is required")))
}

/// Parses an optional keyword, falling back to `default` when absent.
pub(crate) fn keyword_or<T>(value: Option<&str>, default: T) -> Result<T, ControlError>
where
    T: std::str::FromStr<Err = InvalidParam>,
{
    non_blank(value).map_or(Ok(default), |raw| Ok(raw.parse::<T>()?))
}

pub(crate) fn count_in_range(
    name: &str,
    value: Option<u32>,
    default: u32,
    max: u32,
) -> Result<u32, ControlError> {
    let value = value.unwrap_or(default);
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ControlError::Validation(format!(
            "{name} must be between 1 and {max}"
        )))
    }
}
