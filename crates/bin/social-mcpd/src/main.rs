//! Daemon entry point for the social media MCP server.
//!
//! Loads configuration from the CLI and environment, builds the control
//! plane, and serves MCP over stdio and/or streamable HTTP.

mod config;

use social_core::services::build_control_plane;
use social_mcp::SocialMcp;
use social_mcp::server::{serve_stdio, serve_streamable_http};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::SocialConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Logs go to stderr so stdout stays free for the stdio transport.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = SocialConfig::from_args()?;
    init_tracing(&config.log_filter);

    let control = build_control_plane(config.services_config())?;
    let service = SocialMcp::new(control).with_owner_number(config.owner_number.clone());

    match (config.enable_stdio, config.mcp_serve) {
        (true, true) => {
            let http = serve_streamable_http(service.clone(), config.http_config());
            serve_both(serve_stdio(service), http).await?;
        }
        (true, false) => serve_stdio(service).await?,
        (false, _) => serve_streamable_http(service, config.http_config()).await?,
    }
    Ok(())
}

/// Runs stdio in the foreground and HTTP in a task. Whichever side stops
/// first ends the daemon, and an HTTP failure (e.g. the address is taken)
/// is returned instead of leaving stdio running alone.
async fn serve_both<S, H>(stdio: S, http: H) -> Result<(), BoxError>
where
    S: Future<Output = Result<(), BoxError>>,
    H: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    let mut http = tokio::spawn(http);
    tokio::select! {
        result = stdio => {
            http.abort();
            result?;
            info!("stdio session closed, stopped HTTP server");
        }
        joined = &mut http => {
            if let Err(err) = joined? {
                error!("HTTP server failed: {err}");
                return Err(err);
            }
            info!("HTTP server stopped");
        }
    }
    Ok(())
}
