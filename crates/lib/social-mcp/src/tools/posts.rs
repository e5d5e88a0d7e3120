use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use social_core::control::{ManagePostsRequest, SchedulePostRequest};

use crate::SocialMcp;
use crate::helpers;

/// Parameters for scheduling a post.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SchedulePostParams {
    /// Post text.
    pub content: String,
    /// Comma-separated platforms, e.g. `twitter,linkedin`.
    pub platforms: String,
    /// Local time as `YYYY-MM-DD HH:MM`.
    pub schedule_time: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

/// Parameters for listing, cancelling or rescheduling posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ManagePostsParams {
    /// `list` (default), `cancel` or `reschedule`.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    /// New local time for `reschedule`.
    #[serde(default)]
    pub schedule_time: Option<String>,
}

#[tool_router(router = tool_router_posts, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Schedule a post for one or more platforms. Records intent only; nothing is published.")]
    async fn schedule_post(
        &self,
        Parameters(params): Parameters<SchedulePostParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .schedule_post(SchedulePostRequest {
                content: params.content,
                platforms: params.platforms,
                schedule_time: params.schedule_time,
                media_url: params.media_url,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    #[tool(description = "List pending posts, or cancel / reschedule one by id.")]
    async fn manage_scheduled_posts(
        &self,
        Parameters(params): Parameters<ManagePostsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .manage_scheduled_posts(ManagePostsRequest {
                action: params.action,
                post_id: params.post_id,
                schedule_time: params.schedule_time,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
