//! Startup pipeline: resolve the source, load and merge configuration, then
//! hand agents and plugins to the host.

use crate::agents::AgentRegistry;
use crate::cli::{Cli, UiMode};
use crate::config::{locate, BuiltinDefaults, CoderConfig, ResolvedConfig};
use crate::error::Result;
use crate::plugins::{AgentRuntime, PluginManager, PluginRegistry};
use crate::project::SourceDir;
use crate::web_host;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Command-line inputs to startup.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub source: PathBuf,
    pub config: Option<PathBuf>,
    pub initialize: bool,
    pub ui: UiMode,
    pub http: Option<String>,
    pub http_password: Option<String>,
    pub http_bearer: Option<String>,
}

impl From<&Cli> for StartOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            source: cli.source.clone(),
            config: cli.config.clone(),
            initialize: cli.initialize,
            ui: cli.ui,
            http: cli.http.clone(),
            http_password: cli.http_password.clone(),
            http_bearer: cli.http_bearer.clone(),
        }
    }
}

/// Resolve the effective configuration for `options`.
///
/// The source directory and HTTP flags are checked before anything is
/// written, so a bad invocation never leaves a `.tokenring` directory behind.
pub fn resolve_config(options: &StartOptions) -> Result<ResolvedConfig> {
    let source = SourceDir::resolve(&options.source)?;
    let web_host = web_host::from_flags(
        options.http.as_deref(),
        options.http_password.as_deref(),
        options.http_bearer.as_deref(),
    )?;

    let config_file =
        locate::resolve_config_path(&source, options.config.as_deref(), options.initialize)?;
    info!(path = %config_file.display(), "loading configuration");

    let user = CoderConfig::from_file(&config_file)?;
    let agents = AgentRegistry::load()?;
    let config = ResolvedConfig::merge(
        user,
        BuiltinDefaults::for_source(&source, web_host),
        &agents,
        source.root(),
        &config_file,
    )?;

    for (name, provider) in &config.models {
        debug!(
            provider = %name,
            kind = provider.kind(),
            base_url = provider.base_url().unwrap_or("default"),
            "model provider configured"
        );
    }
    for path in config.missing_credentials() {
        warn!(provider = %path, "no API key resolved");
    }
    Ok(config)
}

pub struct App {
    config: ResolvedConfig,
    plugins: PluginRegistry,
    ui: UiMode,
}

impl App {
    pub fn bootstrap(options: &StartOptions) -> Result<Self> {
        Ok(Self {
            config: resolve_config(options)?,
            plugins: PluginRegistry::core(),
            ui: options.ui,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn ui(&self) -> UiMode {
        self.ui
    }

    /// Register agents, install the core plugins, then the UI plugin.
    pub fn start(&self, manager: &mut dyn PluginManager, runtime: &mut dyn AgentRuntime) -> Result<()> {
        runtime.register_agents(&self.config.agents)?;
        manager.install_plugins(self.plugins.plugins(), &self.config)?;

        match PluginRegistry::ui_plugin(self.ui) {
            Some(ui) => manager.install_plugins(&[ui], &self.config)?,
            None => warn!("no UI plugin selected, running headless"),
        }
        Ok(())
    }
}
