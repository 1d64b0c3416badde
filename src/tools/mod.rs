//! The fixed tool set offered to the conversational model.
//!
//! Tools are a closed enum rather than a lookup table, so adding one is a
//! compile-time-checked change: every `match` over [`ToolKind`] must handle
//! it. Unknown tool names from the model map to `None` and are treated as a
//! no-op by the orchestrator.

use crate::types::ToolDefinition;
use serde_json::json;

/// Every tool the conversational model may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Responds to greetings; logs an optional message.
    Greetings,
    /// Fans a problem statement out to all configured agents in parallel.
    ActivateSwarm,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Greetings, ToolKind::ActivateSwarm];

    /// Resolve a wire-level tool name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "greetings" => Some(ToolKind::Greetings),
            "activate_swarm" => Some(ToolKind::ActivateSwarm),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Greetings => "greetings",
            ToolKind::ActivateSwarm => "activate_swarm",
        }
    }

    /// Declaration sent to the model for this tool.
    pub fn definition(&self) -> ToolDefinition {
        match self {
            ToolKind::Greetings => ToolDefinition {
                name: self.name().to_string(),
                description: "Responds to greetings like \"hi\" or \"hello\" and can \
                              optionally echo a message."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "Optional message to log or respond with."
                        }
                    }
                }),
            },
            ToolKind::ActivateSwarm => ToolDefinition {
                name: self.name().to_string(),
                description: "Activates the ant swarm to solve a problem statement by \
                              parallelizing calls and aggregating results."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "problem": {
                            "type": "string",
                            "description": "The problem description to provide to all ants."
                        }
                    },
                    "required": ["problem"]
                }),
            },
        }
    }

    /// Declarations for the whole tool set, in a fixed order.
    pub fn definitions() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(|kind| kind.definition()).collect()
    }
}
