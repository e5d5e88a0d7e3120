use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use social_core::control::{ContentCalendarRequest, ContentSuggestionRequest};

use crate::SocialMcp;
use crate::helpers;

/// Parameters for post suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ContentSuggestionParams {
    pub platform: String,
    /// `engagement`, `informative`, `promotional` or `trending`.
    pub content_type: String,
    pub topic: String,
}

/// Parameters for a content calendar.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ContentCalendarParams {
    pub platform: String,
    /// Number of days, 1 to 30. Defaults to 7.
    #[serde(default, deserialize_with = "helpers::lenient_u32")]
    pub days: Option<u32>,
    /// Comma-separated topics to rotate through.
    #[serde(default)]
    pub focus_topics: Option<String>,
}

#[tool_router(router = tool_router_content, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Three post ideas for a platform, content type and topic.")]
    async fn create_content_suggestion(
        &self,
        Parameters(params): Parameters<ContentSuggestionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .create_content_suggestion(&ContentSuggestionRequest {
                platform: params.platform,
                content_type: params.content_type,
                topic: params.topic,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    #[tool(description = "A day-by-day content plan starting today.")]
    async fn create_content_calendar(
        &self,
        Parameters(params): Parameters<ContentCalendarParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .create_content_calendar(&ContentCalendarRequest {
                platform: params.platform,
                days: params.days,
                focus_topics: params.focus_topics,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
