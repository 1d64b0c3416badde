//! Colored output helpers for the CLI.

use crate::swarm::AgentReply;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the A.N.T.S banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
"#,
                "    _    _  _ _____ ___ ".bright_cyan().bold(),
                "   / \\  | \\| |_   _/ __|".cyan().bold(),
                "  / _ \\ | .` | | | \\__ \\".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Agent Network Task Swarm".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("A.N.T.S - Agent Network Task Swarm v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "→".bright_blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print an assistant reply
    pub fn reply(&self, text: &str) {
        if self.colored {
            println!("{} {}", "ants>".bright_green().bold(), text);
        } else {
            println!("ants> {}", text);
        }
    }

    /// Print a synthesis reply from the swarm follow-up
    pub fn synthesis(&self, text: &str) {
        if self.colored {
            println!("{} {}", "swarm>".bright_magenta().bold(), text);
        } else {
            println!("swarm> {}", text);
        }
    }

    /// Print one agent's fan-out reply
    pub fn agent_reply(&self, reply: &AgentReply) {
        let tag = format!("{} ({})", reply.name, reply.model);
        match &reply.error {
            Some(error) => {
                if self.colored {
                    println!("  {} {}", tag.yellow().bold(), format!("failed: {}", error).red());
                } else {
                    println!("  {} failed: {}", tag, error);
                }
            }
            None => {
                if self.colored {
                    println!("  {} {}", tag.bright_cyan().bold(), reply.text);
                } else {
                    println!("  {} {}", tag, reply.text);
                }
            }
        }
    }
}
