use crate::app::{self, StartOptions};
use crate::cli::ConfigCommands;
use crate::error::{ConfigError, Result};
use crate::utils::style;

pub fn execute(command: &ConfigCommands, options: &StartOptions) -> Result<()> {
    match command {
        ConfigCommands::Validate => validate(options),
        ConfigCommands::Show => show(options),
    }
}

fn validate(options: &StartOptions) -> Result<()> {
    println!("Validating configuration...");

    match app::resolve_config(options) {
        Ok(config) => {
            println!("  Config file: {}", config.config_file.display());
            println!("  Model providers: {}", config.models.len());
            for (name, provider) in &config.models {
                match provider.base_url() {
                    Some(url) => println!("    {} ({}) {}", name, provider.kind(), url),
                    None => println!("    {} ({})", name, provider.kind()),
                }
            }
            println!("  Agents: {}", config.agents.len());
            for path in config.missing_credentials() {
                println!("{}", style::warning(format!("No API key resolved for {}", path)));
            }
            println!("{}", style::success("Configuration is valid"));
            Ok(())
        }
        Err(e) => {
            println!("{}", style::error("Configuration is invalid"));
            Err(e)
        }
    }
}

fn show(options: &StartOptions) -> Result<()> {
    let config = app::resolve_config(options)?;

    println!("# Effective configuration (user config > built-in defaults)");
    println!("# Source: {}", config.source_root.display());
    println!("# File:   {}\n", config.config_file.display());

    let rendered = toml::to_string_pretty(&config.redacted()).map_err(|e| ConfigError::Render {
        what: "configuration",
        message: e.to_string(),
    })?;
    print!("{}", rendered);
    Ok(())
}
