//! OpenAI Chat Completions client.
//!
//! Sends `POST {base_url}/v1/chat/completions` with a bearer-token credential.
//! This vendor takes only a role-tagged message array, so the system prompt is
//! injected as a leading system-role message. The reply text comes from
//! `choices[0].message.content`; a missing content field is an empty reply,
//! never an error.

use crate::llm::client::{ChatGateway, Completion, CompletionRequest, RequestInput};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), timeout)
    }

    /// Create a client against a custom endpoint (compatible APIs, tests).
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
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatGateway for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: request.system.clone(),
        }];
        match &request.input {
            RequestInput::Prompt(prompt) => messages.push(ChatMessage {
                role: "user",
                content: prompt.clone(),
            }),
            RequestInput::Messages(history) => {
                for message in history {
                    let role = if message.role == "assistant" {
                        "assistant"
                    } else {
                        "user"
                    };
                    messages.push(ChatMessage {
                        role,
                        content: message.content.flatten(),
                    });
                }
            }
        }

        let body = ChatCompletionRequest {
            model: &request.model,
            messages,
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_output_tokens,
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream { status, body });
        }

        let decoded: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("OpenAI response: {}", e)))?;

        let (text, stop_reason) = decoded
            .choices
            .into_iter()
            .next()
            .map(|choice| (choice.message.content.unwrap_or_default(), choice.finish_reason))
            .unwrap_or_default();

        Ok(Completion {
            text,
            tool_calls: vec![],
            stop_reason,
        })
    }

    fn vendor(&self) -> &'static str {
        "OpenAI"
    }
}
