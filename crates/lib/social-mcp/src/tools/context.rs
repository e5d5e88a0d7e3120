use rmcp::{
    ErrorData,
    model::{CallToolResult, Content, ErrorCode},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::SocialMcp;
use crate::helpers;

/// Payload listing the MCP commands.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: [
                "help - List the MCP commands of this server.",
                "schedule_post - Record a post for later publication on one or more platforms.",
                "manage_scheduled_posts - List pending posts, or cancel / reschedule one by id.",
                "generate_hashtags - Exactly `count` hashtags for a post (AI when configured).",
                "generate_advanced_hashtags - Strategy-driven hashtags with difficulty and content analysis.",
                "get_analytics - Engagement, reach, impressions and followers for a platform or `all`.",
                "get_trending_topics - Trending topics with content ideas and timing tips.",
                "create_content_suggestion - Three post ideas for a platform, content type and topic.",
                "create_content_calendar - A day-by-day content plan of up to 30 days.",
                "get_audience_insights - Demographics, growth, engagement or a combined report.",
                "manage_competitors - Add, remove, list, analyze or compare competitors.",
                "validate - Return the configured owner number.",
                "health - Returns `ok`.",
            ]
            .into_iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl SocialMcp {
    #[tool(description = "List the MCP commands of this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }

    #[tool(description = "Return the owner number configured for this server.")]
    async fn validate(&self) -> Result<CallToolResult, ErrorData> {
        let owner_number = self.owner_number().ok_or_else(|| {
            helpers::mcp_err(
                ErrorCode::INVALID_REQUEST,
                "no owner number is configured (set SOCIAL_OWNER_NUMBER)",
            )
        })?;
        Ok(CallToolResult::success(vec![Content::text(owner_number.to_string())]))
    }
}
