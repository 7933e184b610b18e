//! Smoke test binary for a running agent backend
//! Sends one message to each agent (or the ones named on the command line)
//! and prints the replies. Not part of the main application.
//!
//! Usage: `smoke_chat [global|rag|websearch]... [-- message]`

use agent_chat_client::panel::AgentPanel;
use agent_chat_client::{AgentType, ClientConfig, ConversationStore, HttpAgentApi};
use anyhow::{bail, Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_MESSAGE: &str = "What is 2+2? Answer in one sentence.";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let (agents, message) = parse_args(env::args().skip(1))?;
    let config = ClientConfig::from_env();
    let api = HttpAgentApi::from_config(&config).context("Failed to build HTTP client")?;

    println!("Agent API: {}", api.base_url());
    println!("Message:   {}\n", message);

    // Scratch store; nothing is persisted
    let mut store = ConversationStore::new();
    let mut failures = 0;

    for agent in agents {
        println!("{}...", agent.display_name());
        let mut panel = AgentPanel::new(agent, config.progress_interval());
        panel.input = message.clone();

        if !panel.submit(&mut store, &api).await {
            bail!("{} refused the message", agent);
        }

        let reply = store
            .current_conversation()
            .and_then(|c| c.messages.last())
            .map(|m| m.content.clone())
            .unwrap_or_default();
        if reply == agent_chat_client::panel::FALLBACK_REPLY || reply.starts_with("Error:") {
            failures += 1;
            eprintln!("   ✗ {}\n", reply);
        } else {
            println!("   ✓ {}\n", reply.trim());
        }
    }

    if failures > 0 {
        bail!("{} agent(s) did not answer", failures);
    }
    Ok(())
}

fn parse_args<I>(args: I) -> Result<(Vec<AgentType>, String)>
where
    I: Iterator<Item = String>,
{
    let mut agents = Vec::new();
    let mut message_words = Vec::new();
    let mut in_message = false;

    for arg in args {
        if in_message {
            message_words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--" => in_message = true,
            "global" => agents.push(AgentType::Global),
            "rag" => agents.push(AgentType::Rag),
            "websearch" => agents.push(AgentType::WebSearch),
            other => bail!("Unknown agent '{}', expected global, rag or websearch", other),
        }
    }

    if agents.is_empty() {
        agents = AgentType::ALL.to_vec();
    }
    let message = if message_words.is_empty() {
        DEFAULT_MESSAGE.to_string()
    } else {
        message_words.join(" ")
    };
    Ok((agents, message))
}
