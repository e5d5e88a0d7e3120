//! MCP server runners for social-mcp.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::{info, warn};

use crate::SocialMcp;

pub const DEFAULT_MCP_HTTP_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 8086);

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub auth_token: Option<String>,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            auth_token: None,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    /// Requires `Authorization: Bearer <token>` on every `/mcp` request.
    #[must_use]
    pub fn with_auth_token(mut self, auth_token: Option<String>) -> Self {
        self.auth_token = auth_token;
        self
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    #[must_use]
    pub const fn with_sse_keep_alive(mut self, sse_keep_alive: Option<Duration>) -> Self {
        self.sse_keep_alive = sse_keep_alive;
        self
    }

    #[must_use]
    pub const fn with_sse_retry(mut self, sse_retry: Option<Duration>) -> Self {
        self.sse_retry = sse_retry;
        self
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MCP_HTTP_ADDR)
    }
}

/// Serves the MCP server over stdio.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(service: SocialMcp) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (stdin, stdout) = stdio();
    info!("serving MCP over stdio");
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

async fn require_bearer(
    State(expected): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token.trim() == &*expected);
    if authorized {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "rejected MCP request without a valid bearer token");
        (StatusCode::UNAUTHORIZED, "missing or invalid bearer token").into_response()
    }
}

/// Builds the HTTP app: `/health` plus the MCP service at `/mcp`, guarded by
/// the bearer token when one is configured.
#[must_use]
pub fn router(service: SocialMcp, config: &McpHttpServerConfig) -> Router {
    let mcp: StreamableHttpService<SocialMcp, LocalSessionManager> = StreamableHttpService::new(
        move || Ok(service.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            sse_keep_alive: config.sse_keep_alive,
            sse_retry: config.sse_retry,
            stateful_mode: config.stateful_mode,
            ..Default::default()
        },
    );

    let mcp_routes = Router::new().nest_service("/mcp", mcp);
    let mcp_routes = match config.auth_token.as_deref() {
        Some(token) => mcp_routes.layer(middleware::from_fn_with_state(
            Arc::<str>::from(token),
            require_bearer,
        )),
        None => mcp_routes,
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(mcp_routes)
}

/// Serves the MCP server using streamable HTTP transport.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    service: SocialMcp,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(service, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %config.addr,
        auth = config.auth_token.is_some(),
        "serving MCP over streamable HTTP at /mcp"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use social_core::services::{ServicesConfig, build_control_plane};
    use tower::ServiceExt;

    fn service(dir: &tempfile::TempDir) -> SocialMcp {
        let control = build_control_plane(ServicesConfig::new(dir.path()))
            .expect("control plane should build");
        SocialMcp::new(control)
    }

    fn config(token: Option<&str>) -> McpHttpServerConfig {
        McpHttpServerConfig::default().with_auth_token(token.map(ToString::to_string))
    }

    fn mcp_request(authorization: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json, text/event-stream");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder
            .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
            .expect("valid request")
    }

    #[tokio::test]
    async fn health_is_open_even_with_auth() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = router(service(&dir), &config(Some("secret")));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn mcp_requires_bearer_token_when_configured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = router(service(&dir), &config(Some("secret")));

        let missing = app
            .clone()
            .oneshot(mcp_request(None))
            .await
            .expect("router should respond");
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app
            .clone()
            .oneshot(mcp_request(Some("Bearer nope")))
            .await
            .expect("router should respond");
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let accepted = app
            .oneshot(mcp_request(Some("Bearer secret")))
            .await
            .expect("router should respond");
        assert_ne!(accepted.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn mcp_is_open_without_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = router(service(&dir), &config(None));
        let response = app
            .oneshot(mcp_request(None))
            .await
            .expect("router should respond");
        assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
