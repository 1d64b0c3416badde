//! LLM gateway clients and abstractions.
//!
//! - [`client`] - the vendor-agnostic [`ChatGateway`] contract
//! - [`anthropic`] - Anthropic Messages API (the conversational model)
//! - [`openai`] - OpenAI Chat Completions (the fan-out agents)

/// Anthropic Messages API client.
pub mod anthropic;
/// Gateway trait, request/response types, layered defaults.
pub mod client;
/// OpenAI Chat Completions client.
pub mod openai;

pub use anthropic::AnthropicClient;
pub use client::{
    ChatDefaults, ChatGateway, Completion, CompletionOverrides, CompletionRequest, ContentBlock,
    MessageContent, RequestInput, WireMessage,
};
pub use openai::OpenAIClient;
