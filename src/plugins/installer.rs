use super::{AgentRuntime, PluginDescriptor, PluginManager};
use crate::agents::AgentDefinition;
use crate::config::ResolvedConfig;
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPlugin {
    pub name: &'static str,
    pub package: &'static str,

    /// Whether the plugin's config section was present
    pub configured: bool,
}

/// Records the install plan for a run: plugins in order plus the agent ids
/// handed to the runtime.
#[derive(Debug, Default)]
pub struct Installer {
    installed: Vec<InstalledPlugin>,
    agents: Vec<String>,
}

impl Installer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> &[InstalledPlugin] {
        &self.installed
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.iter().any(|p| p.name == name)
    }
}

impl PluginManager for Installer {
    fn install_plugins(&mut self, plugins: &[PluginDescriptor], config: &ResolvedConfig) -> Result<()> {
        for plugin in plugins {
            if self.is_installed(plugin.name) {
                return Err(ConfigError::PluginConflict(plugin.name.to_string()));
            }

            let configured = plugin.section.is_some_and(|s| config.has_section(s));
            if configured {
                info!(plugin = plugin.name, package = plugin.package, "installing plugin");
            } else {
                debug!(
                    plugin = plugin.name,
                    package = plugin.package,
                    "installing plugin without configuration"
                );
            }

            self.installed.push(InstalledPlugin {
                name: plugin.name,
                package: plugin.package,
                configured,
            });
        }
        Ok(())
    }
}

impl AgentRuntime for Installer {
    fn register_agents(&mut self, agents: &BTreeMap<String, AgentDefinition>) -> Result<()> {
        for id in agents.keys() {
            if self.agents.contains(id) {
                return Err(ConfigError::InvalidAgent {
                    id: id.clone(),
                    message: "registered twice".to_string(),
                });
            }
            debug!(agent = %id, "registering agent");
            self.agents.push(id.clone());
        }
        info!(count = agents.len(), "registered agents");
        Ok(())
    }
}
