//! Conversation session and tool-call orchestration.

/// The orchestrator driving conversational exchanges.
pub mod service;
/// Append-only conversation history.
pub mod session;

pub use service::{synthesis_prompt, ChatOutcome, ChatService};
pub use session::ChatSession;
