use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Front end started after plugin installation.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Prompt-based terminal UI
    #[default]
    Inquirer,
    /// Full-screen terminal UI
    Ink,
    /// Headless, no UI plugin
    None,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the project configuration
    Validate,

    /// Show effective configuration after merging defaults (secrets masked)
    Show,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommands {
    /// List available agents grouped by category
    List,

    /// Show one agent definition
    Show {
        /// Agent id, e.g. "code" or "system-architect"
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// Infer capabilities for a provider's model list
    #[command(long_about = "Infer capabilities for a provider's model list.\n\n\
        Reads an OpenAI style {\"data\": [...]}, Ollama style {\"models\": [...]}\n\
        or bare JSON array from --file (or stdin) and prints one capability\n\
        descriptor per usable model, using the rules configured for PROVIDER.")]
    Classify {
        /// Provider name as configured under [models]
        provider: String,

        /// Model list JSON file (default: stdin)
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "tr-coder")]
#[command(about = "TokenRing Coder - AI-powered coding assistant", long_about = None)]
#[command(version = env!("TR_CODER_VERSION"))]
#[command(after_help = "\
EXAMPLES:
  tr-coder --source ./my-app --initialize   Create .tokenring/coder-config.toml
  tr-coder --source ./my-app                Start with the interactive UI
  tr-coder --http 0.0.0.0:8080 --ui none    Serve the web UI only
  tr-coder agents list                      List available agents

For details about a specific command, use:
  tr-coder <command> --help")]
pub struct Cli {
    /// Path to the working directory to work with
    #[arg(short = 's', long, default_value = ".", env = "TR_CODER_SOURCE", global = true)]
    pub source: PathBuf,

    /// Config file to load instead of <source>/.tokenring/coder-config.*
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Initialize the source directory with a new config directory
    #[arg(short = 'i', long)]
    pub initialize: bool,

    /// Select the UI to use for the application
    #[arg(long, value_enum, default_value_t = UiMode::Inquirer)]
    pub ui: UiMode,

    /// Start the HTTP server, on 127.0.0.1 and a random port unless given
    #[arg(long, value_name = "HOST:PORT", num_args(0..=1), default_missing_value = "")]
    pub http: Option<String>,

    /// Username and password for the web UI (default: no auth)
    #[arg(long = "httpPassword", value_name = "USER:PASSWORD")]
    pub http_password: Option<String>,

    /// Username and bearer token for the web UI (default: no auth)
    #[arg(long = "httpBearer", value_name = "USER:BEARER")]
    pub http_bearer: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or validate the project configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect the merged agent table
    Agents {
        #[command(subcommand)]
        command: AgentsCommands,
    },

    /// Model capability tools
    Models {
        #[command(subcommand)]
        command: ModelsCommands,
    },
}
