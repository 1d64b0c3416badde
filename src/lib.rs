//! # A.N.T.S - Agent Network Task Swarm
//!
//! A multi-agent chat tool: one conversational model (Anthropic) that can
//! fan a problem statement out to a swarm of independently configured agents
//! (OpenAI) in parallel, then synthesize their replies into one answer.
//!
//! ## Overview
//!
//! A.N.T.S can be used in two ways:
//!
//! 1. **As a CLI** - run the `ants` binary (`chat`, `swarm`, `agents`)
//! 2. **As a library** - import the components into your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use ants::{AgentRoster, AnthropicClient, ChatService, SwarmCoordinator};
//! use ants::agents::NewAgent;
//! use ants::llm::{ChatDefaults, OpenAIClient};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let timeout = Duration::from_secs(45);
//!     let chat = Arc::new(AnthropicClient::new(std::env::var("ANTHROPIC_API_KEY")?, timeout)?);
//!     let agents = Arc::new(OpenAIClient::new(std::env::var("OPENAI_API_KEY")?, timeout)?);
//!
//!     let mut roster = AgentRoster::default();
//!     roster.create(NewAgent::default());
//!
//!     let swarm = SwarmCoordinator::new(agents);
//!     let mut service = ChatService::new(chat, swarm, ChatDefaults::default());
//!     let outcome = service.send("hello", &roster.snapshot()).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - agent profiles and the roster that owns them
//! - [`chat`] - conversation session and tool-call orchestration
//! - [`config`] - TOML configuration and credential resolution
//! - [`llm`] - vendor gateway clients (Anthropic, OpenAI)
//! - [`swarm`] - parallel fan-out coordination
//! - [`tools`] - the fixed tool set offered to the conversational model
//! - [`types`] - common types and error handling

#![warn(missing_docs)]

/// Agent profiles and the roster that owns them.
pub mod agents;
/// Conversation session and tool-call orchestration.
pub mod chat;
/// CLI argument parsing and terminal output.
pub mod cli;
/// Configuration loading and credential resolution.
pub mod config;
/// LLM gateway clients and abstractions.
pub mod llm;
/// Parallel fan-out coordination.
pub mod swarm;
/// The fixed tool set offered to the conversational model.
pub mod tools;
/// Core types (turns, tool calls, errors).
pub mod types;

// Re-export commonly used types
pub use agents::{AgentProfile, AgentRoster};
pub use chat::{ChatOutcome, ChatService, ChatSession};
pub use config::{AntsConfig, Credentials};
pub use llm::{AnthropicClient, ChatGateway, OpenAIClient};
pub use swarm::{AgentReply, SwarmCoordinator};
pub use tools::ToolKind;
pub use types::{AppError, Result};
