//! Core types (conversation turns, tool calls, errors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// A single turn in the conversational history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Wire-level role string used by both vendor APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

// ============= Tool Types =============

/// Declaration of a tool the conversational model may invoke.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool invocation requested by the model, correlated by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No API credential resolvable from any configured source.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success HTTP status from a vendor endpoint.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Vendor response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
