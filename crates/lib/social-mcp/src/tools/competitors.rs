use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use social_core::control::CompetitorRequest;

use crate::SocialMcp;
use crate::helpers;

/// Parameters for competitor tracking.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ManageCompetitorsParams {
    /// `add`, `remove`, `list`, `analyze` or `compare`.
    pub action: String,
    #[serde(default)]
    pub competitor_name: Option<String>,
    /// Handles for `add`, e.g. `twitter:@acme,instagram:@acme`.
    #[serde(default)]
    pub platforms: Option<String>,
    /// Comma-separated names for `compare`.
    #[serde(default)]
    pub competitors_to_compare: Option<String>,
}

#[tool_router(router = tool_router_competitors, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Track, analyze and compare competitor accounts.")]
    async fn manage_competitors(
        &self,
        Parameters(params): Parameters<ManageCompetitorsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .manage_competitors(&CompetitorRequest {
                action: params.action,
                competitor_name: params.competitor_name,
                platforms: params.platforms,
                competitors_to_compare: params.competitors_to_compare,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
