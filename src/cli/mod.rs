//! CLI for the `ants` binary.
//!
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A.N.T.S - Agent Network Task Swarm
#[derive(Parser, Debug)]
#[command(
    name = "ants",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "A.N.T.S - Agent Network Task Swarm",
    long_about = "Chat with a conversational model that can fan problems out to a swarm of\n\
                  configurable LLM agents and synthesize their answers, or broadcast a\n\
                  problem to the swarm directly.",
    after_help = "EXAMPLES:\n    \
                  ants chat                          # Interactive chat with the swarm tool armed\n    \
                  ants swarm \"optimize X\"            # Broadcast a problem to all agents\n    \
                  ants agents list                   # Show the configured roster\n    \
                  ants --config my.toml chat         # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ants.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat with the conversational model
    Chat,

    /// Broadcast a problem to every configured agent and print the replies
    Swarm {
        /// The problem statement to fan out
        problem: String,
    },

    /// Manage agent profiles
    #[command(subcommand)]
    Agents(AgentCommands),
}

/// Agent roster subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List the agents loaded from configuration
    List,

    /// Add an agent to the roster and show the resulting profile
    ///
    /// The profile is not persisted; add a matching [[agents.profiles]]
    /// entry to ants.toml to keep it across runs.
    Add {
        /// Agent name (auto-picked when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Top-p, clamped to [0, 1]
        #[arg(long)]
        top_p: Option<f64>,

        /// Temperature, clamped to [0, 2]
        #[arg(long)]
        temperature: Option<f64>,

        /// System prompt for this agent
        #[arg(long)]
        system_prompt: Option<String>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
