use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use social_core::ai::{CompletionConfig, DEFAULT_MODEL};
use social_core::platforms::{GraphCredentials, LinkedinCredentials, PlatformCredentials};
use social_core::services::ServicesConfig;
use social_mcp::server::McpHttpServerConfig;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:8086";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "social-mcpd", version, about = "Social media MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "SOCIAL_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[arg(
        long = "stdio",
        env = "SOCIAL_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "SOCIAL_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "SOCIAL_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(long, env = "SOCIAL_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[arg(long, env = "SOCIAL_OWNER_NUMBER")]
    owner_number: Option<String>,

    #[arg(
        long,
        env = "SOCIAL_UPSTREAM_TIMEOUT_SECS",
        default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS
    )]
    upstream_timeout_secs: u64,

    #[arg(long, env = "SOCIAL_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,

    #[arg(long, env = "TWITTER_BEARER_TOKEN", hide_env_values = true)]
    twitter_bearer_token: Option<String>,

    #[arg(long, env = "FACEBOOK_ACCESS_TOKEN", hide_env_values = true)]
    facebook_access_token: Option<String>,

    #[arg(long, env = "FACEBOOK_PAGE_ID")]
    facebook_page_id: Option<String>,

    #[arg(long, env = "INSTAGRAM_ACCESS_TOKEN", hide_env_values = true)]
    instagram_access_token: Option<String>,

    #[arg(long, env = "INSTAGRAM_ACCOUNT_ID")]
    instagram_account_id: Option<String>,

    #[arg(long, env = "LINKEDIN_ACCESS_TOKEN", hide_env_values = true)]
    linkedin_access_token: Option<String>,

    #[arg(long, env = "LINKEDIN_ORGANIZATION_ID")]
    linkedin_organization_id: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    openai_model: String,

    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct SocialConfig {
    pub data_dir: PathBuf,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub auth_token: Option<String>,
    pub owner_number: Option<String>,
    pub upstream_timeout: Duration,
    pub log_filter: String,
    pub credentials: PlatformCredentials,
    pub completion: Option<CompletionConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    IncompleteCredentials { set: &'static str, missing: &'static str },
    InvalidSetting { name: &'static str, value: String },
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::IncompleteCredentials { set, missing } => {
                write!(f, "{set} is set but {missing} is missing")
            }
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransport => {
                f.write_str("no transport enabled: set SOCIAL_ENABLE_STDIO or SOCIAL_MCP_SERVE")
            }
        }
    }
}

impl Error for ConfigError {}

impl SocialConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn services_config(&self) -> ServicesConfig {
        let config = ServicesConfig::new(self.data_dir.clone())
            .with_credentials(self.credentials.clone())
            .with_upstream_timeout(self.upstream_timeout);
        match &self.completion {
            Some(completion) => config.with_completion(completion.clone()),
            None => config,
        }
    }

    pub fn http_config(&self) -> McpHttpServerConfig {
        McpHttpServerConfig::new(self.mcp_http_addr).with_auth_token(self.auth_token.clone())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Both halves of a credential pair, or neither.
fn credential_pair(
    token: Option<String>,
    id: Option<String>,
    token_name: &'static str,
    id_name: &'static str,
) -> Result<Option<(String, String)>, ConfigError> {
    match (present(token), present(id)) {
        (Some(token), Some(id)) => Ok(Some((token, id))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::IncompleteCredentials {
            set: token_name,
            missing: id_name,
        }),
        (None, Some(_)) => Err(ConfigError::IncompleteCredentials {
            set: id_name,
            missing: token_name,
        }),
    }
}

impl TryFrom<CliArgs> for SocialConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }
        if args.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingSetting("SOCIAL_DATA_DIR"));
        }
        if args.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "SOCIAL_UPSTREAM_TIMEOUT_SECS",
                value: args.upstream_timeout_secs.to_string(),
            });
        }

        let facebook = credential_pair(
            args.facebook_access_token,
            args.facebook_page_id,
            "FACEBOOK_ACCESS_TOKEN",
            "FACEBOOK_PAGE_ID",
        )?;
        let instagram = credential_pair(
            args.instagram_access_token,
            args.instagram_account_id,
            "INSTAGRAM_ACCESS_TOKEN",
            "INSTAGRAM_ACCOUNT_ID",
        )?;
        let linkedin = credential_pair(
            args.linkedin_access_token,
            args.linkedin_organization_id,
            "LINKEDIN_ACCESS_TOKEN",
            "LINKEDIN_ORGANIZATION_ID",
        )?;
        let credentials = PlatformCredentials {
            twitter_bearer_token: present(args.twitter_bearer_token),
            facebook: facebook.map(|(access_token, account_id)| GraphCredentials {
                access_token,
                account_id,
            }),
            instagram: instagram.map(|(access_token, account_id)| GraphCredentials {
                access_token,
                account_id,
            }),
            linkedin: linkedin.map(|(access_token, organization_id)| LinkedinCredentials {
                access_token,
                organization_id,
            }),
        };

        let model = present(Some(args.openai_model)).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = present(args.openai_base_url);
        let completion = present(args.openai_api_key).map(|api_key| {
            let config = CompletionConfig::new(api_key).with_model(model);
            match base_url {
                Some(base_url) => config.with_base_url(base_url),
                None => config,
            }
        });

        let log_filter =
            present(Some(args.log)).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir: args.data_dir,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            auth_token: present(args.auth_token),
            owner_number: present(args.owner_number),
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
            log_filter,
            credentials,
            completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            enable_stdio: false,
            mcp_serve: true,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            auth_token: None,
            owner_number: None,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            log: DEFAULT_LOG_FILTER.to_string(),
            twitter_bearer_token: None,
            facebook_access_token: None,
            facebook_page_id: None,
            instagram_access_token: None,
            instagram_account_id: None,
            linkedin_access_token: None,
            linkedin_organization_id: None,
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: None,
        }
    }

    #[test]
    fn defaults_run_http_with_mock_data() {
        let config = SocialConfig::try_from(base_args()).expect("config should parse");
        assert!(config.mcp_serve);
        assert!(!config.enable_stdio);
        assert!(config.credentials.configured().is_empty());
        assert!(config.completion.is_none());
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn blank_values_are_unset() {
        let mut args = base_args();
        args.auth_token = Some("  ".to_string());
        args.twitter_bearer_token = Some(String::new());
        args.openai_api_key = Some(" ".to_string());

        let config = SocialConfig::try_from(args).expect("config should parse");
        assert!(config.auth_token.is_none());
        assert!(config.credentials.twitter_bearer_token.is_none());
        assert!(config.completion.is_none());
    }

    #[test]
    fn token_without_id_is_rejected() {
        let mut args = base_args();
        args.instagram_access_token = Some("token".to_string());
        let err = SocialConfig::try_from(args).err().expect("should reject");
        assert!(matches!(
            err,
            ConfigError::IncompleteCredentials { missing: "INSTAGRAM_ACCOUNT_ID", .. }
        ));
    }

    #[test]
    fn complete_pairs_and_ai_key_are_wired() {
        let mut args = base_args();
        args.linkedin_access_token = Some("token".to_string());
        args.linkedin_organization_id = Some("42".to_string());
        args.openai_api_key = Some("key".to_string());
        args.openai_base_url = Some("http://localhost:1234/v1".to_string());

        let config = SocialConfig::try_from(args).expect("config should parse");
        assert_eq!(
            config.credentials.linkedin.as_ref().map(|c| c.organization_id.as_str()),
            Some("42")
        );
        let completion = config.completion.expect("AI should be enabled");
        assert_eq!(completion.model, DEFAULT_MODEL);
        assert_eq!(completion.base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn at_least_one_transport_is_required() {
        let mut args = base_args();
        args.mcp_serve = false;
        assert!(matches!(SocialConfig::try_from(args), Err(ConfigError::NoTransport)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut args = base_args();
        args.upstream_timeout_secs = 0;
        assert!(matches!(
            SocialConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "SOCIAL_UPSTREAM_TIMEOUT_SECS", .. })
        ));
    }
}
