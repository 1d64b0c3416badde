//! Append-only conversation history.

use crate::types::{Turn, TurnRole};

/// Ordered turn history for the conversational model.
///
/// Appends are the only mutations; reads go through [`snapshot`], which
/// returns an independent copy so callers can never mutate session-owned
/// state directly.
///
/// [`snapshot`]: ChatSession::snapshot
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<Turn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Copy of the full turn sequence at call time.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Role of the most recent turn, if any.
    pub fn last_role(&self) -> Option<TurnRole> {
        self.turns.last().map(|t| t.role)
    }
}
