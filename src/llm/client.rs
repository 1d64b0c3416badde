//! Vendor-agnostic chat gateway contract.
//!
//! A [`ChatGateway`] translates one [`CompletionRequest`] into the wire shape
//! a specific vendor endpoint expects, performs the call, and normalizes the
//! response to a [`Completion`]. A success response with no extractable text
//! yields an empty string, not an error, so one agent's malformed reply never
//! aborts a fan-out. No retries happen at this layer; callers decide.

use crate::types::{Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Generic chat completion trait implemented by each vendor client.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Perform one completion call.
    ///
    /// # Errors
    ///
    /// - [`AppError::Auth`](crate::types::AppError::Auth) when no credential
    ///   was resolvable at client construction
    /// - [`AppError::Upstream`](crate::types::AppError::Upstream) on a
    ///   non-success HTTP status, carrying status and body text
    /// - [`AppError::Http`](crate::types::AppError::Http) on transport
    ///   failures, including the per-call timeout
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;

    /// Human-readable vendor name, for logging.
    fn vendor(&self) -> &'static str;
}

/// One vendor-agnostic completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub top_p: f64,
    pub temperature: f64,
    pub system: String,
    pub max_output_tokens: u32,
    pub input: RequestInput,
    /// Tool declarations, attached to the wire request only when non-empty.
    pub tools: Vec<ToolDefinition>,
}

/// The prompt side of a request: either a single-turn prompt or a full
/// role-tagged message history.
#[derive(Debug, Clone)]
pub enum RequestInput {
    Prompt(String),
    Messages(Vec<WireMessage>),
}

/// Normalized completion result.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Reply text; empty when the response carried no text content.
    pub text: String,
    /// Tool invocations requested by the model, if any.
    pub tool_calls: Vec<ToolCall>,
    /// Vendor stop/finish reason, when reported.
    pub stop_reason: Option<String>,
}

impl Completion {
    /// Reconstruct the assistant content blocks for echoing this completion
    /// back into a follow-up request.
    pub fn content_blocks(&self) -> Vec<ContentBlock> {
        let mut blocks = Vec::new();
        if !self.text.is_empty() {
            blocks.push(ContentBlock::Text {
                text: self.text.clone(),
            });
        }
        for call in &self.tool_calls {
            blocks.push(ContentBlock::ToolUse {
                id: call.id.clone(),
                name: call.name.clone(),
                input: call.arguments.clone(),
            });
        }
        blocks
    }
}

// ============= Wire Message Types =============

/// A role-tagged message as sent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: MessageContent,
}

impl WireMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }

    pub fn assistant_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: MessageContent::Blocks(blocks),
        }
    }
}

/// Message content: a plain string or structured content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// Flatten content to plain text, joining text blocks and dropping
    /// structured blocks. Used for vendors without block support.
    pub fn flatten(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A structured content block within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

// ============= Layered Request Defaults =============

/// Default completion parameters for a gateway, merged with per-call
/// overrides field-by-field, override fields always winning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatDefaults {
    pub model: String,
    pub top_p: f64,
    pub temperature: f64,
    pub system_prompt: String,
    pub max_output_tokens: u32,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            top_p: 0.9,
            temperature: 1.0,
            system_prompt: String::new(),
            max_output_tokens: 1024,
        }
    }
}

impl ChatDefaults {
    /// Build a request from these defaults plus an optional override layer.
    pub fn request(
        &self,
        input: RequestInput,
        tools: Vec<ToolDefinition>,
        overrides: &CompletionOverrides,
    ) -> CompletionRequest {
        CompletionRequest {
            model: overrides.model.clone().unwrap_or_else(|| self.model.clone()),
            top_p: overrides.top_p.unwrap_or(self.top_p),
            temperature: overrides.temperature.unwrap_or(self.temperature),
            system: overrides
                .system
                .clone()
                .unwrap_or_else(|| self.system_prompt.clone()),
            max_output_tokens: overrides.max_output_tokens.unwrap_or(self.max_output_tokens),
            input,
            tools,
        }
    }
}

/// Per-call override layer. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CompletionOverrides {
    pub model: Option<String>,
    pub top_p: Option<f64>,
    pub temperature: Option<f64>,
    pub system: Option<String>,
    pub max_output_tokens: Option<u32>,
}
