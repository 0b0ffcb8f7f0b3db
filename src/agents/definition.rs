//! Data structures for parsing agent persona TOML files.

use serde::{Deserialize, Serialize};

/// An agent persona handed to the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    /// Display name
    pub name: String,

    pub description: String,

    /// Grouping used by agent pickers (e.g. "Quality & Operations")
    pub category: String,

    /// Whether other agents may dispatch work to this one
    #[serde(default = "default_callable")]
    pub callable: bool,

    /// Slash commands executed when the agent starts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial_commands: Vec<String>,

    #[serde(default)]
    pub visual: VisualStyle,

    pub chat: ChatSettings,

    #[serde(default, skip_serializing_if = "FilesystemSettings::is_empty")]
    pub filesystem: FilesystemSettings,
}

fn default_callable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Sampling parameters and prompt for the agent's chat loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatSettings {
    pub system_prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,

    /// Model override, e.g. "OpenAI:gpt-4.1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Tool names or globs enabled when the agent starts
    #[serde(default)]
    pub enabled_tools: Vec<String>,

    #[serde(default)]
    pub context: ContextSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSettings {
    /// Order in which the initial prompt context is assembled
    #[serde(default = "default_initial_context")]
    pub initial: Vec<ContextItem>,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            initial: default_initial_context(),
        }
    }
}

fn default_initial_context() -> Vec<ContextItem> {
    vec![
        ContextItem::SystemMessage,
        ContextItem::TaskPlan,
        ContextItem::ToolContext,
        ContextItem::SearchFiles,
        ContextItem::SelectedFiles,
        ContextItem::CurrentMessage,
    ]
}

/// A single block of the assembled prompt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContextItem {
    SystemMessage,
    TaskPlan,
    ToolContext,
    SearchFiles,
    SelectedFiles,
    CurrentMessage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemSettings {
    /// Files added to the agent's selection on start
    #[serde(default)]
    pub selected_files: Vec<String>,
}

impl FilesystemSettings {
    pub fn is_empty(&self) -> bool {
        self.selected_files.is_empty()
    }
}
