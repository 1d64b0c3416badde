//! Configuration loading and credential resolution.
//!
//! Infrastructure config lives in a TOML file (`ants.toml` by default):
//! `[chat]` for the conversational model defaults, `[agents]` for fan-out
//! defaults and pre-seeded profiles, `[gateway]` for timeouts and base-url
//! overrides, and an optional `[keys]` table acting as the persisted
//! credential store. A missing file yields the built-in defaults.

use crate::agents::{AgentDefaults, AgentRoster, NewAgent};
use crate::llm::ChatDefaults;
use crate::types::{AppError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the Anthropic credential.
pub const ANTHROPIC_KEY_VAR: &str = "ANTHROPIC_API_KEY";
/// Environment variable holding the OpenAI credential.
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AntsConfig {
    /// Conversational model defaults.
    pub chat: ChatDefaults,
    /// Fan-out agent defaults and pre-seeded profiles.
    pub agents: AgentsConfig,
    /// HTTP gateway settings.
    pub gateway: GatewayConfig,
    /// Persisted credential store, keyed by variable name.
    pub keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
    pub profiles: Vec<NewAgent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Per-call timeout in seconds. A stalled vendor call fails after this
    /// and counts as a per-call failure under the fan-out isolation policy.
    pub timeout_secs: u64,
    pub anthropic_base_url: Option<String>,
    pub openai_base_url: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 45,
            anthropic_base_url: None,
            openai_base_url: None,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AntsConfig {
    /// Load configuration from a TOML file. A missing file is not an error;
    /// it yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("reading {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("parsing {}: {}", path.display(), e)))
    }

    /// Build a roster seeded with the configured profiles.
    pub fn roster(&self) -> AgentRoster {
        let mut roster = AgentRoster::new(self.agents.defaults.clone());
        for seed in &self.agents.profiles {
            roster.create(seed.clone());
        }
        roster
    }
}

/// Layered credential store.
///
/// Resolution order per key: runtime value set programmatically, then the
/// persisted `[keys]` table, then the process environment. Empty values are
/// treated as absent at every tier.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    runtime: HashMap<String, String>,
    stored: HashMap<String, String>,
}

impl Credentials {
    pub fn from_config(config: &AntsConfig) -> Self {
        Self {
            runtime: HashMap::new(),
            stored: config.keys.clone(),
        }
    }

    /// Set a runtime credential, which takes precedence over every other tier.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.runtime.insert(name.into(), value.into());
    }

    /// Resolve a credential by variable name.
    ///
    /// # Errors
    ///
    /// [`AppError::Auth`] when no tier holds a non-empty value.
    pub fn resolve(&self, name: &str) -> Result<String> {
        self.runtime
            .get(name)
            .cloned()
            .filter(|v| !v.is_empty())
            .or_else(|| self.stored.get(name).cloned().filter(|v| !v.is_empty()))
            .or_else(|| std::env::var(name).ok().filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                AppError::Auth(format!(
                    "{} not found; set it in the environment, the [keys] table, or at runtime",
                    name
                ))
            })
    }
}
