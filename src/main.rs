use ants::cli::output::Output;
use ants::cli::{AgentCommands, Cli, Commands};
use ants::config::{AntsConfig, Credentials, ANTHROPIC_KEY_VAR, OPENAI_KEY_VAR};
use ants::llm::{AnthropicClient, OpenAIClient};
use ants::agents::NewAgent;
use ants::{AgentRoster, ChatService, SwarmCoordinator};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();

    let default_filter = if cli.verbose { "ants=debug" } else { "ants=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = AntsConfig::load(&cli.config)?;
    let credentials = Credentials::from_config(&config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&config, &credentials, &output).await,
        Commands::Swarm { problem } => run_swarm(&config, &credentials, &output, &problem).await,
        Commands::Agents(command) => run_agents(&config, &output, command),
    }
}

/// Interactive REPL against the conversational model with the swarm tool armed.
async fn run_chat(
    config: &AntsConfig,
    credentials: &Credentials,
    output: &Output,
) -> anyhow::Result<()> {
    let timeout = config.gateway.timeout();
    let chat_gateway = Arc::new(match &config.gateway.anthropic_base_url {
        Some(base) => {
            AnthropicClient::with_base_url(credentials.resolve(ANTHROPIC_KEY_VAR)?, base.clone(), timeout)?
        }
        None => AnthropicClient::new(credentials.resolve(ANTHROPIC_KEY_VAR)?, timeout)?,
    });
    let agent_gateway = agent_gateway(config, credentials)?;

    let roster = config.roster();
    let swarm = SwarmCoordinator::new(agent_gateway);
    let mut service = ChatService::new(chat_gateway, swarm, config.chat.clone());

    output.banner();
    output.info(&format!(
        "{} agent(s) in the swarm; type 'exit' to quit",
        roster.len()
    ));

    let profiles = roster.snapshot();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        // A failed exchange becomes an inline error line; the session lives on.
        match service.send(&line, &profiles).await {
            Ok(Some(outcome)) => {
                output.reply(&outcome.reply);
                if let Some(synthesis) = &outcome.synthesis {
                    output.synthesis(synthesis);
                }
            }
            Ok(None) => {}
            Err(e) => output.error(&e.to_string()),
        }
    }

    Ok(())
}

/// Direct broadcast to all configured agents, no conversation involved.
async fn run_swarm(
    config: &AntsConfig,
    credentials: &Credentials,
    output: &Output,
    problem: &str,
) -> anyhow::Result<()> {
    let roster = config.roster();
    let swarm = SwarmCoordinator::new(agent_gateway(config, credentials)?);

    let replies = swarm.activate(problem, &roster.snapshot()).await;
    if replies.is_empty() {
        output.info("nothing to do: no agents configured or blank problem");
        return Ok(());
    }

    output.info(&format!("{} agent(s) replied:", replies.len()));
    for reply in &replies {
        output.agent_reply(reply);
    }
    Ok(())
}

fn run_agents(config: &AntsConfig, output: &Output, command: AgentCommands) -> anyhow::Result<()> {
    match command {
        AgentCommands::List => {
            let roster = config.roster();
            if roster.is_empty() {
                output.info("no agents configured; add [[agents.profiles]] entries to ants.toml");
                return Ok(());
            }
            for profile in roster.snapshot() {
                output.info(&format!(
                    "{}: model={} top_p={} temperature={} max_tokens={}",
                    profile.name,
                    profile.model,
                    profile.top_p,
                    profile.temperature,
                    profile.max_output_tokens
                ));
            }
        }
        AgentCommands::Add {
            name,
            model,
            top_p,
            temperature,
            system_prompt,
        } => {
            let mut roster = config.roster();
            let profile = roster.create(NewAgent {
                name,
                model,
                top_p,
                temperature,
                system_prompt,
                ..Default::default()
            });
            output.info(&format!(
                "created {}: model={} top_p={} temperature={}",
                profile.name, profile.model, profile.top_p, profile.temperature
            ));
            output.info("not persisted; add a matching [[agents.profiles]] entry to ants.toml to keep it");
        }
    }
    Ok(())
}

fn agent_gateway(
    config: &AntsConfig,
    credentials: &Credentials,
) -> anyhow::Result<Arc<OpenAIClient>> {
    let timeout = config.gateway.timeout();
    let key = credentials.resolve(OPENAI_KEY_VAR)?;
    Ok(Arc::new(match &config.gateway.openai_base_url {
        Some(base) => OpenAIClient::with_base_url(key, base.clone(), timeout)?,
        None => OpenAIClient::new(key, timeout)?,
    }))
}
