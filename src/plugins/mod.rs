//! Plugin descriptors and the seams to the plugin host.
//!
//! tr-coder does not load plugins itself. It decides *which* plugins a run
//! needs, in what order, and hands them together with the resolved
//! configuration to a [`PluginManager`]. Agents go to an [`AgentRuntime`].

pub mod installer;
pub mod registry;

pub use installer::{InstalledPlugin, Installer};
pub use registry::PluginRegistry;

use crate::agents::AgentDefinition;
use crate::config::ResolvedConfig;
use crate::error::Result;
use std::collections::BTreeMap;

/// A feature package the plugin host can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Short name, e.g. "filesystem"
    pub name: &'static str,

    /// Package the host resolves the name to
    pub package: &'static str,

    /// Top-level config section the plugin reads, if any
    pub section: Option<&'static str>,
}

impl PluginDescriptor {
    pub const fn new(name: &'static str, package: &'static str, section: Option<&'static str>) -> Self {
        Self {
            name,
            package,
            section,
        }
    }
}

/// Installs plugins into the running application.
pub trait PluginManager {
    /// Install `plugins` in order. Each plugin reads its own section of
    /// `config`.
    fn install_plugins(&mut self, plugins: &[PluginDescriptor], config: &ResolvedConfig) -> Result<()>;
}

/// Receives the merged agent table.
pub trait AgentRuntime {
    fn register_agents(&mut self, agents: &BTreeMap<String, AgentDefinition>) -> Result<()>;
}
