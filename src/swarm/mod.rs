//! Parallel fan-out of one problem statement to every configured agent.
//!
//! All calls are dispatched without awaiting each other and the batch
//! completes only after every call has settled. Each call's outcome is
//! captured independently: a failed agent yields an empty-text reply with an
//! error marker and never aborts its siblings. Result order matches the
//! profile order at call time, not completion order.

use crate::agents::AgentProfile;
use crate::llm::{ChatGateway, CompletionRequest, RequestInput};
use crate::types::Result;
use futures::future;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// One agent's reply to a fanned-out problem.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub agent_id: Uuid,
    pub name: String,
    pub model: String,
    /// Reply text; empty when the agent failed or returned nothing.
    pub text: String,
    /// Failure description when this agent's call did not succeed.
    pub error: Option<String>,
}

/// Issues one gateway call per profile and aggregates the results.
pub struct SwarmCoordinator {
    gateway: Arc<dyn ChatGateway>,
}

impl SwarmCoordinator {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Broadcast `problem` to every profile concurrently.
    ///
    /// An empty profile list or a blank problem returns an empty result
    /// sequence without issuing any call.
    pub async fn activate(&self, problem: &str, profiles: &[AgentProfile]) -> Vec<AgentReply> {
        let problem = problem.trim();
        if problem.is_empty() || profiles.is_empty() {
            return Vec::new();
        }

        debug!(agents = profiles.len(), "dispatching swarm");

        let calls = profiles.iter().map(|profile| async move {
            match self.call_agent(problem, profile).await {
                Ok(text) => AgentReply {
                    agent_id: profile.id,
                    name: profile.name.clone(),
                    model: profile.model.clone(),
                    text,
                    error: None,
                },
                Err(e) => {
                    warn!(agent = %profile.name, error = %e, "agent call failed");
                    AgentReply {
                        agent_id: profile.id,
                        name: profile.name.clone(),
                        model: profile.model.clone(),
                        text: String::new(),
                        error: Some(e.to_string()),
                    }
                }
            }
        });

        let replies = future::join_all(calls).await;
        debug!(
            replies = replies.len(),
            failed = replies.iter().filter(|r| r.error.is_some()).count(),
            "swarm settled"
        );
        replies
    }

    async fn call_agent(&self, problem: &str, profile: &AgentProfile) -> Result<String> {
        let request = CompletionRequest {
            model: profile.model.clone(),
            top_p: profile.top_p,
            temperature: profile.temperature,
            system: profile.system_prompt.clone(),
            max_output_tokens: profile.max_output_tokens,
            input: RequestInput::Prompt(problem.to_string()),
            tools: vec![],
        };
        Ok(self.gateway.complete(&request).await?.text)
    }
}
