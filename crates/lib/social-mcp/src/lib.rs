//! MCP server implementation for social-mcp.
//!
//! This crate wires the social control plane into rmcp tool handlers and
//! serves them over stdio or streamable HTTP.

mod helpers;
mod tools;
pub mod server;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use social_core::control::SocialControlPlane;

const SERVER_INSTRUCTIONS: &str = r"social-mcp provides MCP tools for planning and analysing social media activity on Twitter/X, Facebook, Instagram and LinkedIn.

Workflow:
1. Draft content:
   - `create_content_suggestion` for three post ideas, `create_content_calendar` for a day-by-day plan.
   - `generate_hashtags` or `generate_advanced_hashtags` (strategy: trending, niche, mixed, branded).
2. Schedule it:
   - `schedule_post` records a post with a `YYYY-MM-DD HH:MM` local time.
   - `manage_scheduled_posts` lists, cancels or reschedules pending posts.
3. Measure:
   - `get_analytics` for one platform or `all`, `get_trending_topics`, `get_audience_insights`.
   - `manage_competitors` to track, analyze and compare competitor accounts.

Notes:
- Scheduling only records intent. Nothing is published.
- Platforms without credentials are served deterministic mock data; every data payload carries `source: real | mocked`.
- Generated content carries `generated_by: ai | template | rules`.
- `help` lists the tools, `validate` returns the configured owner number, `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct SocialMcp {
    tool_router: ToolRouter<Self>,
    control: SocialControlPlane,
    owner_number: Option<String>,
}

impl SocialMcp {
    #[must_use]
    pub fn new(control: SocialControlPlane) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_posts()
            + Self::tool_router_hashtags()
            + Self::tool_router_insights()
            + Self::tool_router_content()
            + Self::tool_router_competitors()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
            owner_number: None,
        }
    }

    /// Sets the number returned by the `validate` tool.
    #[must_use]
    pub fn with_owner_number(mut self, owner_number: Option<String>) -> Self {
        self.owner_number = owner_number;
        self
    }

    pub(crate) const fn control(&self) -> &SocialControlPlane {
        &self.control
    }

    pub(crate) fn owner_number(&self) -> Option<&str> {
        self.owner_number.as_deref()
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl SocialMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for SocialMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
