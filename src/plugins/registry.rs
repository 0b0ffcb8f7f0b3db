use super::PluginDescriptor;
use crate::cli::UiMode;

/// Core plugins, in installation order.
/// To add a plugin: add ONE line here.
const CORE_PLUGINS: &[PluginDescriptor] = &[
    PluginDescriptor::new("agent", "@tokenring-ai/agent", Some("agents")),
    PluginDescriptor::new("ai-client", "@tokenring-ai/ai-client", Some("models")),
    PluginDescriptor::new("audio", "@tokenring-ai/audio", Some("audio")),
    PluginDescriptor::new("aws", "@tokenring-ai/aws", Some("aws")),
    PluginDescriptor::new("chat-frontend", "@tokenring-ai/chat-frontend", None),
    PluginDescriptor::new("chat", "@tokenring-ai/chat", Some("defaults")),
    PluginDescriptor::new("checkpoint", "@tokenring-ai/checkpoint", Some("checkpoint")),
    PluginDescriptor::new("chrome", "@tokenring-ai/chrome", Some("websearch")),
    PluginDescriptor::new("codebase", "@tokenring-ai/codebase", Some("codebase")),
    PluginDescriptor::new("code-watch", "@tokenring-ai/code-watch", Some("filesystem")),
    PluginDescriptor::new("database", "@tokenring-ai/database", Some("database")),
    PluginDescriptor::new("docker", "@tokenring-ai/docker", Some("docker")),
    PluginDescriptor::new("drizzle-storage", "@tokenring-ai/drizzle-storage", Some("checkpoint")),
    PluginDescriptor::new("feedback", "@tokenring-ai/feedback", None),
    PluginDescriptor::new("file-index", "@tokenring-ai/file-index", Some("file_index")),
    PluginDescriptor::new("filesystem", "@tokenring-ai/filesystem", Some("filesystem")),
    PluginDescriptor::new("git", "@tokenring-ai/git", None),
    PluginDescriptor::new("javascript", "@tokenring-ai/javascript", None),
    PluginDescriptor::new("kubernetes", "@tokenring-ai/kubernetes", None),
    PluginDescriptor::new("linux-audio", "@tokenring-ai/linux-audio", Some("audio")),
    PluginDescriptor::new("posix-system", "@tokenring-ai/posix-system", Some("filesystem")),
    PluginDescriptor::new("mcp", "@tokenring-ai/mcp", Some("mcp")),
    PluginDescriptor::new("memory", "@tokenring-ai/memory", None),
    PluginDescriptor::new("mysql", "@tokenring-ai/mysql", Some("database")),
    PluginDescriptor::new("research", "@tokenring-ai/research", None),
    PluginDescriptor::new("rpc", "@tokenring-ai/rpc", None),
    PluginDescriptor::new("queue", "@tokenring-ai/queue", None),
    PluginDescriptor::new("sandbox", "@tokenring-ai/sandbox", Some("sandbox")),
    PluginDescriptor::new("scheduler", "@tokenring-ai/scheduler", None),
    PluginDescriptor::new("scraperapi", "@tokenring-ai/scraperapi", Some("websearch")),
    PluginDescriptor::new("scripting", "@tokenring-ai/scripting", None),
    PluginDescriptor::new("serper", "@tokenring-ai/serper", Some("websearch")),
    PluginDescriptor::new("slack", "@tokenring-ai/slack", None),
    PluginDescriptor::new("tasks", "@tokenring-ai/tasks", None),
    PluginDescriptor::new("telegram", "@tokenring-ai/telegram", None),
    PluginDescriptor::new("terminal", "@tokenring-ai/terminal", None),
    PluginDescriptor::new("testing", "@tokenring-ai/testing", Some("testing")),
    PluginDescriptor::new("thinking", "@tokenring-ai/thinking", None),
    PluginDescriptor::new("vault", "@tokenring-ai/vault", None),
    PluginDescriptor::new("web-host", "@tokenring-ai/web-host", Some("web_host")),
    PluginDescriptor::new("websearch", "@tokenring-ai/websearch", Some("websearch")),
    PluginDescriptor::new("workflow", "@tokenring-ai/workflow", None),
];

const CLI_PLUGIN: PluginDescriptor = PluginDescriptor::new("cli", "@tokenring-ai/cli", Some("cli"));
const INK_CLI_PLUGIN: PluginDescriptor =
    PluginDescriptor::new("cli-ink", "@tokenring-ai/cli-ink", Some("ink_cli"));

/// The plugin set for one run. Built at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    pub fn core() -> Self {
        Self {
            plugins: CORE_PLUGINS.to_vec(),
        }
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Front-end plugin for the selected UI. `None` means headless.
    pub fn ui_plugin(mode: UiMode) -> Option<PluginDescriptor> {
        match mode {
            UiMode::Inquirer => Some(CLI_PLUGIN),
            UiMode::Ink => Some(INK_CLI_PLUGIN),
            UiMode::None => None,
        }
    }
}
