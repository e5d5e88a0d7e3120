use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use social_core::control::{AnalyticsRequest, AudienceRequest, TrendsRequest};

use crate::SocialMcp;
use crate::helpers;

/// Parameters for account analytics.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetAnalyticsParams {
    /// A platform name or `all`.
    pub platform: String,
    /// `7d`, `30d` (default) or `90d`.
    #[serde(default)]
    pub timeframe: Option<String>,
    /// `engagement`, `reach`, `impressions`, `followers` or `all` (default).
    #[serde(default)]
    pub metric_type: Option<String>,
}

/// Parameters for trending topics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetTrendingTopicsParams {
    /// `twitter`, `instagram` or `general` (default).
    #[serde(default)]
    pub platform: Option<String>,
    /// `technology`, `business`, `entertainment`, `sports` or `all` (default).
    #[serde(default)]
    pub category: Option<String>,
    /// `US`, `UK`, `IN` or `global` (default).
    #[serde(default)]
    pub location: Option<String>,
}

/// Parameters for audience insights.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetAudienceInsightsParams {
    pub platform: String,
    /// `demographics`, `growth`, `engagement` or `report` (default).
    #[serde(default)]
    pub insight_type: Option<String>,
}

#[tool_router(router = tool_router_insights, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Fetch engagement, reach, impressions and followers for a platform or `all`.")]
    async fn get_analytics(
        &self,
        Parameters(params): Parameters<GetAnalyticsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .get_analytics(&AnalyticsRequest {
                platform: params.platform,
                timeframe: params.timeframe,
                metric_type: params.metric_type,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    #[tool(description = "Trending topics with content ideas and timing tips.")]
    async fn get_trending_topics(
        &self,
        Parameters(params): Parameters<GetTrendingTopicsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .get_trending_topics(&TrendsRequest {
                platform: params.platform,
                category: params.category,
                location: params.location,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }

    #[tool(description = "Audience demographics, follower growth, engagement, or a combined report.")]
    async fn get_audience_insights(
        &self,
        Parameters(params): Parameters<GetAudienceInsightsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = self
            .control()
            .get_audience_insights(&AudienceRequest {
                platform: params.platform,
                insight_type: params.insight_type,
            })
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
