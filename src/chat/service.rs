//! Conversational orchestration, including the two-phase tool-use protocol.
//!
//! One send is one exchange: append the user turn, call the conversational
//! model with the full history and the tool set attached, then inspect the
//! response. A `tool_use` entry triggers the matching [`ToolKind`] handler
//! out-of-band; for the swarm tool that means running the fan-out, then
//! issuing a follow-up call that carries the correlated `tool_result`
//! acknowledgment plus a synthesis request built from the aggregated
//! replies. Handler failures are logged and never break the primary turn.

use crate::agents::AgentProfile;
use crate::chat::session::ChatSession;
use crate::llm::{
    ChatDefaults, ChatGateway, Completion, CompletionOverrides, ContentBlock, RequestInput,
    WireMessage,
};
use crate::swarm::{AgentReply, SwarmCoordinator};
use crate::tools::ToolKind;
use crate::types::{Result, ToolCall, Turn};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Acknowledgment string reported back for a completed tool invocation.
const TOOL_COMPLETED: &str = "Tool completed successfully";

/// What one send produced.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The primary assistant reply. Always present, even when a tool ran.
    pub reply: String,
    /// The synthesis reply from the follow-up call, when the swarm tool ran
    /// and the follow-up yielded text.
    pub synthesis: Option<String>,
}

/// Drives the conversation with the primary model and owns its session.
pub struct ChatService {
    gateway: Arc<dyn ChatGateway>,
    swarm: SwarmCoordinator,
    session: ChatSession,
    defaults: ChatDefaults,
}

impl ChatService {
    pub fn new(gateway: Arc<dyn ChatGateway>, swarm: SwarmCoordinator, defaults: ChatDefaults) -> Self {
        Self {
            gateway,
            swarm,
            session: ChatSession::new(),
            defaults,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Send one user message and run the exchange to completion.
    ///
    /// Blank input is a no-op returning `Ok(None)`. Gateway failures on the
    /// primary call propagate to the caller, which should render them as an
    /// inline error rather than crash the session. Taking `&mut self` means
    /// overlapping sends on one session are rejected at compile time.
    pub async fn send(
        &mut self,
        text: &str,
        roster: &[AgentProfile],
    ) -> Result<Option<ChatOutcome>> {
        let content = text.trim();
        if content.is_empty() {
            return Ok(None);
        }

        self.session.append_user(content);
        let history = wire_history(&self.session.snapshot());

        let request = self.defaults.request(
            RequestInput::Messages(history.clone()),
            ToolKind::definitions(),
            &CompletionOverrides::default(),
        );
        let completion = self.gateway.complete(&request).await?;

        let mut synthesis = None;
        if let Some(call) = completion.tool_calls.first() {
            match ToolKind::from_name(&call.name) {
                // Unrecognized tool = no-op, by contract.
                None => debug!(tool = %call.name, "ignoring unrecognized tool"),
                Some(kind) => {
                    match self.run_tool(kind, call, &completion, &history, roster).await {
                        Ok(result) => synthesis = result,
                        Err(e) => warn!(tool = %call.name, error = %e, "tool handler failed"),
                    }
                }
            }
        }

        // The first assistant text is always shown, even alongside a tool
        // call; the synthesis reply (if any) was appended before it.
        let reply = completion.text.clone();
        self.session.append_assistant(&reply);
        Ok(Some(ChatOutcome { reply, synthesis }))
    }

    async fn run_tool(
        &mut self,
        kind: ToolKind,
        call: &ToolCall,
        completion: &Completion,
        history: &[WireMessage],
        roster: &[AgentProfile],
    ) -> Result<Option<String>> {
        match kind {
            ToolKind::Greetings => {
                info!("greetings tool called");
                if let Some(message) = call.arguments.get("message").and_then(|v| v.as_str()) {
                    info!(message, "greetings");
                }
                Ok(None)
            }
            ToolKind::ActivateSwarm => {
                // A missing problem argument degrades to an empty problem,
                // which the coordinator treats as a no-call batch.
                let problem = call
                    .arguments
                    .get("problem")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let replies = self.swarm.activate(problem, roster).await;
                self.send_synthesis(problem, &replies, call, completion, history)
                    .await
            }
        }
    }

    /// Phase two of the tool protocol: report the tool result into the
    /// conversation and ask for a synthesis of the swarm replies.
    async fn send_synthesis(
        &mut self,
        problem: &str,
        replies: &[AgentReply],
        call: &ToolCall,
        completion: &Completion,
        history: &[WireMessage],
    ) -> Result<Option<String>> {
        let mut followup = history.to_vec();
        followup.push(WireMessage::assistant_blocks(completion.content_blocks()));
        followup.push(WireMessage::user_blocks(vec![
            ContentBlock::ToolResult {
                tool_use_id: call.id.clone(),
                content: TOOL_COMPLETED.to_string(),
            },
            ContentBlock::Text {
                text: synthesis_prompt(problem, replies),
            },
        ]));

        let request = self.defaults.request(
            RequestInput::Messages(followup),
            ToolKind::definitions(),
            &CompletionOverrides::default(),
        );
        let followup_completion = self.gateway.complete(&request).await?;

        // Empty follow-up text means silent completion: nothing is appended.
        if followup_completion.text.is_empty() {
            return Ok(None);
        }
        self.session.append_assistant(&followup_completion.text);
        Ok(Some(followup_completion.text))
    }
}

/// Project session turns onto wire messages.
pub fn wire_history(turns: &[Turn]) -> Vec<WireMessage> {
    turns
        .iter()
        .map(|turn| WireMessage {
            role: turn.role.as_str().to_string(),
            content: crate::llm::MessageContent::Text(turn.content.clone()),
        })
        .collect()
}

/// Build the synthesis request: instruction block, the original problem, and
/// each agent reply rendered as `**name (model)**: text`.
pub fn synthesis_prompt(problem: &str, replies: &[AgentReply]) -> String {
    let mut lines = vec![
        "## Task".to_string(),
        "Synthesize a single, coherent solution to the problem using the agents' \
         responses below. Provide a structured, step-by-step plan and any key \
         trade-offs. Keep it concise and actionable. Do not trigger the tool again."
            .to_string(),
        String::new(),
        "## Problem".to_string(),
        problem.to_string(),
        String::new(),
        "## Agent Responses".to_string(),
    ];
    for reply in replies {
        lines.push(format!("**{} ({})**: {}", reply.name, reply.model, reply.text));
    }
    lines.join("\n")
}
