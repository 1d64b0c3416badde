//! Agent profiles and the roster that owns them.
//!
//! An [`AgentProfile`] is one named configuration of model + sampling
//! parameters + prompts, used for one participant in a fan-out. The
//! [`AgentRoster`] owns the ordered profile list exclusively; callers read
//! through snapshots and mutate through the defined operations only.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Candidate names tried in order when creating an unnamed agent.
pub const DEFAULT_AGENT_NAMES: &[&str] = &[
    "Atta",
    "Weaver",
    "Bullet",
    "Carpenter",
    "Harvester",
    "Leafcutter",
    "Pharaoh",
    "Trap-jaw",
];

/// Prefix for the sequential fallback naming strategy ("Ant 1", "Ant 2", ...).
const FALLBACK_NAME_PREFIX: &str = "Ant";

/// One configured agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub top_p: f64,
    pub temperature: f64,
    pub system_prompt: String,
    pub default_prompt: String,
    pub max_output_tokens: u32,
}

/// Fallback field values for profiles created without explicit settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentDefaults {
    pub model: String,
    pub system_prompt: String,
    pub default_prompt: String,
    pub max_output_tokens: u32,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            system_prompt: "You are one agent in a problem-solving swarm. \
                            Answer the given problem directly and concisely."
                .to_string(),
            default_prompt: String::new(),
            max_output_tokens: 1024,
        }
    }
}

/// Requested settings for a new profile. Unset fields fall back to the
/// roster defaults, with sampling parameters randomized.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewAgent {
    pub name: Option<String>,
    pub model: Option<String>,
    pub top_p: Option<f64>,
    pub temperature: Option<f64>,
    pub system_prompt: Option<String>,
    pub default_prompt: Option<String>,
    pub max_output_tokens: Option<u32>,
}

/// Partial update applied to an existing profile. Numeric fields are clamped
/// to their legal ranges rather than rejected; non-finite values are ignored.
#[derive(Debug, Clone, Default)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub model: Option<String>,
    pub top_p: Option<f64>,
    pub temperature: Option<f64>,
    pub system_prompt: Option<String>,
    pub max_output_tokens: Option<u32>,
}

/// Ordered, exclusively-owned collection of agent profiles.
#[derive(Debug, Clone, Default)]
pub struct AgentRoster {
    agents: Vec<AgentProfile>,
    defaults: AgentDefaults,
}

impl AgentRoster {
    pub fn new(defaults: AgentDefaults) -> Self {
        Self {
            agents: Vec::new(),
            defaults,
        }
    }

    /// Create a profile from the given settings, filling gaps from the
    /// roster defaults. Sampling parameters are randomized unless overridden.
    pub fn create(&mut self, spec: NewAgent) -> &AgentProfile {
        let name = spec
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                let existing: HashSet<String> =
                    self.agents.iter().map(|a| a.name.clone()).collect();
                next_available_name(&existing, DEFAULT_AGENT_NAMES, FALLBACK_NAME_PREFIX)
            });

        let profile = AgentProfile {
            id: Uuid::new_v4(),
            name,
            model: spec.model.unwrap_or_else(|| self.defaults.model.clone()),
            top_p: spec.top_p.unwrap_or_else(random_top_p),
            temperature: spec.temperature.unwrap_or_else(random_temperature),
            system_prompt: spec
                .system_prompt
                .unwrap_or_else(|| self.defaults.system_prompt.clone()),
            default_prompt: spec
                .default_prompt
                .unwrap_or_else(|| self.defaults.default_prompt.clone()),
            max_output_tokens: spec
                .max_output_tokens
                .unwrap_or(self.defaults.max_output_tokens),
        };

        self.agents.push(profile);
        self.agents.last().expect("just pushed")
    }

    /// Apply a partial update in place, validating and clamping numeric
    /// fields. Returns the updated profile, or `None` for an unknown id.
    pub fn update(&mut self, id: Uuid, updates: AgentUpdate) -> Option<&AgentProfile> {
        let agent = self.agents.iter_mut().find(|a| a.id == id)?;

        if let Some(name) = updates.name {
            agent.name = name.trim().to_string();
        }
        if let Some(model) = updates.model {
            agent.model = model;
        }
        if let Some(top_p) = updates.top_p {
            if top_p.is_finite() {
                agent.top_p = top_p.clamp(0.0, 1.0);
            }
        }
        if let Some(temperature) = updates.temperature {
            if temperature.is_finite() {
                agent.temperature = temperature.clamp(0.0, 2.0);
            }
        }
        if let Some(system_prompt) = updates.system_prompt {
            agent.system_prompt = system_prompt;
        }
        if let Some(max_output_tokens) = updates.max_output_tokens {
            agent.max_output_tokens = max_output_tokens.max(1);
        }

        Some(agent)
    }

    pub fn get(&self, id: Uuid) -> Option<&AgentProfile> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Remove a profile by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.agents.len();
        self.agents.retain(|a| a.id != id);
        self.agents.len() != before
    }

    pub fn clear(&mut self) {
        self.agents.clear();
    }

    /// Copy of the current profile list, in creation order.
    pub fn snapshot(&self) -> Vec<AgentProfile> {
        self.agents.clone()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Pick the next name not present in `existing`: first unused candidate,
/// then sequential `"{prefix} N"` names. Deterministic for a given candidate
/// list and existing-name set.
pub fn next_available_name(
    existing: &HashSet<String>,
    candidates: &[&str],
    prefix: &str,
) -> String {
    for candidate in candidates {
        if !existing.contains(*candidate) {
            return (*candidate).to_string();
        }
    }

    let mut index = existing.len() + 1;
    let mut candidate = format!("{} {}", prefix, index);
    while existing.contains(&candidate) {
        index += 1;
        candidate = format!("{} {}", prefix, index);
    }
    candidate
}

/// Random top-p in [0.05, 1.0], rounded to 2 decimals.
pub fn random_top_p() -> f64 {
    round2(rand::rng().random_range(0.05..=1.0))
}

/// Random temperature in [0.2, 2.0], rounded to 2 decimals.
pub fn random_temperature() -> f64 {
    round2(rand::rng().random_range(0.2..=2.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
