use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use social_core::control::{AdvancedHashtagRequest, HashtagRequest};

use crate::SocialMcp;
use crate::helpers;

/// Parameters for rule- or AI-based hashtag generation.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GenerateHashtagsParams {
    pub content: String,
    /// Defaults to `twitter`.
    #[serde(default)]
    pub platform: Option<String>,
    /// Number of hashtags, 1 to 20. Defaults to 10.
    #[serde(default, deserialize_with = "helpers::lenient_u32")]
    pub count: Option<u32>,
}

/// Parameters for the strategy-driven hashtag engine.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GenerateAdvancedHashtagsParams {
    pub content: String,
    /// Defaults to `twitter`.
    #[serde(default)]
    pub platform: Option<String>,
    /// Number of hashtags, 1 to 30. Defaults to 10.
    #[serde(default, deserialize_with = "helpers::lenient_u32")]
    pub count: Option<u32>,
    /// `trending`, `niche`, `mixed` (default) or `branded`.
    #[serde(default)]
    pub strategy: Option<String>,
}

#[tool_router(router = tool_router_hashtags, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Generate hashtags for a post. Returns exactly `count` tags.")]
    async fn generate_hashtags(
        &self,
        Parameters(params): Parameters<GenerateHashtagsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .generate_hashtags(HashtagRequest {
                content: params.content,
                platform: params.platform,
                count: params.count,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    #[tool(description = "Generate hashtags with a strategy, difficulty ratings and a content analysis.")]
    async fn generate_advanced_hashtags(
        &self,
        Parameters(params): Parameters<GenerateAdvancedHashtagsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .generate_advanced_hashtags(&AdvancedHashtagRequest {
                content: params.content,
                platform: params.platform,
                count: params.count,
                strategy: params.strategy,
            })
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
