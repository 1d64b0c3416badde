//! Anthropic Messages API client.
//!
//! Sends `POST {base_url}/v1/messages` with the `x-api-key` credential and
//! `anthropic-version` headers. The system prompt travels in the dedicated
//! `system` field; tool declarations are attached when non-empty. The reply
//! text is the first `text`-typed entry of the top-level `content` array, and
//! `tool_use`-typed entries are surfaced as [`ToolCall`]s.

use crate::llm::client::{ChatGateway, Completion, CompletionRequest, RequestInput, WireMessage};
use crate::types::{AppError, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), timeout)
    }

    /// Create a client against a custom endpoint (local proxies, tests).
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<WireMessage>,
    temperature: f64,
    top_p: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool<'a>>,
}

#[derive(Serialize)]
struct AnthropicTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: &'a serde_json::Value,
}

impl<'a> From<&'a ToolDefinition> for AnthropicTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            name: &tool.name,
            description: &tool.description,
            input_schema: &tool.parameters,
        }
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

/// Lenient content block decoder: unknown block types are skipped rather
/// than failing the whole response.
#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[async_trait]
impl ChatGateway for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let messages = match &request.input {
            RequestInput::Prompt(prompt) => vec![WireMessage::user(prompt.clone())],
            RequestInput::Messages(messages) => messages.clone(),
        };

        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_output_tokens,
            system: &request.system,
            messages,
            temperature: request.temperature,
            top_p: request.top_p,
            tools: request.tools.iter().map(AnthropicTool::from).collect(),
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream { status, body });
        }

        let decoded: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Anthropic response: {}", e)))?;

        // First text-typed block is the reply; absence is an empty reply,
        // never an error.
        let text = decoded
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.clone())
            .unwrap_or_default();

        let tool_calls = decoded
            .content
            .iter()
            .filter(|block| block.kind == "tool_use")
            .map(|block| ToolCall {
                id: block.id.clone().unwrap_or_default(),
                name: block.name.clone().unwrap_or_default(),
                arguments: block.input.clone().unwrap_or(serde_json::Value::Null),
            })
            .collect();

        Ok(Completion {
            text,
            tool_calls,
            stop_reason: decoded.stop_reason,
        })
    }

    fn vendor(&self) -> &'static str {
        "Anthropic"
    }
}
