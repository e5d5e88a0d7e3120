//! Optional OpenAI-compatible chat completion client.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{UpstreamError, UpstreamResult, read_json};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl CompletionConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    #[must_use]
    pub const fn new(client: Client, config: CompletionConfig) -> Self {
        Self { client, config }
    }

    /// Sends a single-message chat completion and returns the trimmed reply.
    ///
    /// # Errors
    /// Returns `UpstreamError` on transport failure, a non-2xx status, or a
    /// reply without text.
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> UpstreamResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let reply: ChatResponse = read_json(response).await?;

        let text = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| UpstreamError::Malformed("completion had no content".to_string()))?;
        debug!(model = %self.config.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

/// Splits a completion into non-empty trimmed lines.
#[must_use]
pub fn reply_lines(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_public_endpoint() {
        let config = CompletionConfig::new("key").with_model("gpt-4o-mini");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn reply_lines_drop_blanks() {
        assert_eq!(reply_lines("#a\n\n  #b  \n"), vec!["#a", "#b"]);
    }

    #[tokio::test]
    async fn unreachable_provider_is_an_error() {
        let client = crate::http::build_client(std::time::Duration::from_millis(500))
            .expect("client");
        let completion = CompletionClient::new(
            client,
            CompletionConfig::new("key").with_base_url("http://127.0.0.1:9/v1"),
        );
        assert!(completion.complete("hi", 10, 0.5).await.is_err());
    }
}
