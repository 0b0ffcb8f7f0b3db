use crate::agents::{by_category, AgentDefinition, AgentRegistry};
use crate::app::{self, StartOptions};
use crate::cli::AgentsCommands;
use crate::error::{ConfigError, Result};
use crate::utils::style;
use std::collections::BTreeMap;
use tracing::info;

pub fn execute(command: &AgentsCommands, options: &StartOptions) -> Result<()> {
    let agents = agent_table(options)?;
    match command {
        AgentsCommands::List => list(&agents),
        AgentsCommands::Show { id } => show(&agents, id),
    }
}

/// Merged agents when the project has a config, built-ins otherwise.
fn agent_table(options: &StartOptions) -> Result<BTreeMap<String, AgentDefinition>> {
    match app::resolve_config(options) {
        Ok(config) => Ok(config.agents),
        Err(ConfigError::ConfigMissing { .. }) => {
            info!("no project config found, listing built-in agents");
            Ok(AgentRegistry::load()?.agents().clone())
        }
        Err(e) => Err(e),
    }
}

fn list(agents: &BTreeMap<String, AgentDefinition>) -> Result<()> {
    for (category, ids) in by_category(agents) {
        println!("{}", style::heading(category));
        for id in ids {
            let agent = &agents[id];
            let marker = if agent.callable { "" } else { " (interactive only)" };
            println!("  {:<26} {}{}", id, agent.description, marker);
        }
        println!();
    }
    Ok(())
}

fn show(agents: &BTreeMap<String, AgentDefinition>, id: &str) -> Result<()> {
    let agent = agents.get(id).ok_or_else(|| ConfigError::InvalidAgent {
        id: id.to_string(),
        message: "no such agent (see 'tr-coder agents list')".to_string(),
    })?;

    let rendered = toml::to_string_pretty(agent).map_err(|e| ConfigError::Render {
        what: "agent",
        message: e.to_string(),
    })?;
    println!("# {}", id);
    print!("{}", rendered);
    Ok(())
}
