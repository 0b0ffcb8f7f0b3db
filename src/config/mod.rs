//! Project configuration.
//!
//! A project keeps its settings in `.tokenring/coder-config.toml` (or
//! `.json`). The file is parsed into [`CoderConfig`], validated, and merged
//! with [`defaults::BuiltinDefaults`] into a [`defaults::ResolvedConfig`].
//!
//! ```toml
//! [defaults]
//! agent = "code"
//! model = "Anthropic:claude-sonnet-4"
//!
//! [models.Anthropic]
//! provider = "anthropic"
//! api_key_env = "ANTHROPIC_API_KEY"
//! ```

pub mod defaults;
pub mod locate;
pub mod sections;

pub use defaults::{BuiltinDefaults, ResolvedConfig};
pub use sections::*;

use crate::agents::AgentDefinition;
use crate::error::{ConfigError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Supported configuration file formats, in probe priority order.
///
/// Data formats stand in for the `ts > mjs > cjs > js` module order, since
/// the config is declarative rather than executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub const PRIORITY: [ConfigFormat; 2] = [ConfigFormat::Toml, ConfigFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::PRIORITY
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

/// The user configuration file, as written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoderConfig {
    pub defaults: DefaultsSection,

    pub models: BTreeMap<String, ModelProviderConfig>,

    #[serde(default)]
    pub agents: BTreeMap<String, AgentDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<FilesystemSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<CheckpointSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<CliSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink_cli: Option<CliSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_host: Option<WebHostSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codebase: Option<CodebaseSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing: Option<TestingSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<SandboxSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websearch: Option<BTreeMap<String, WebSearchProvider>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_index: Option<FileIndexSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCredentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpSection>,
}

impl CoderConfig {
    /// Load and validate a configuration file, dispatching on its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, format, path)
    }

    /// Parse configuration text. `file` is only used in error messages.
    pub fn parse(contents: &str, format: ConfigFormat, file: &Path) -> Result<Self> {
        let parse_error = |message: String| ConfigError::ConfigParse {
            file: file.to_path_buf(),
            message,
        };

        // Parse to a generic document first so syntax errors and schema
        // errors are reported separately, the latter with a dotted path.
        let config: CoderConfig = match format {
            ConfigFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(contents).map_err(|e| parse_error(e.to_string()))?;
                serde_path_to_error::deserialize(toml::Value::Table(table))
                    .map_err(|e| ConfigError::schema(file, e.path().to_string(), e.inner().to_string()))?
            }
            ConfigFormat::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;
                serde_path_to_error::deserialize(value)
                    .map_err(|e| ConfigError::schema(file, e.path().to_string(), e.inner().to_string()))?
            }
        };

        config.validate(file)?;
        Ok(config)
    }

    /// Checks serde cannot express: cross references and regular expressions.
    fn validate(&self, file: &Path) -> Result<()> {
        if self.defaults.agent.trim().is_empty() {
            return Err(ConfigError::schema(file, "defaults.agent", "must not be empty"));
        }

        for (name, provider) in &self.models {
            if let ModelProviderConfig::Azure(p) = provider {
                if p.base_url.is_none() {
                    return Err(ConfigError::schema(
                        file,
                        format!("models.{}.base_url", name),
                        "azure providers require a base_url",
                    ));
                }
            }
            provider
                .inferrer()
                .map_err(|message| ConfigError::schema(file, format!("models.{}", name), message))?;
        }

        if let Some(filesystem) = &self.filesystem {
            if let Some(provider) = &filesystem.default.provider {
                if !filesystem.providers.contains_key(provider) {
                    return Err(ConfigError::schema(
                        file,
                        "filesystem.default.provider",
                        format!("unknown filesystem provider '{}'", provider),
                    ));
                }
            }
            for (name, provider) in &filesystem.providers {
                if let FilesystemProvider::Local {
                    indexed_files,
                    watched_files,
                    ..
                } = provider
                {
                    let prefix = format!("filesystem.providers.{}", name);
                    check_file_matches(file, &format!("{}.indexed_files", prefix), indexed_files)?;
                    check_file_matches(file, &format!("{}.watched_files", prefix), watched_files)?;
                }
            }
        }

        if let Some(checkpoint) = &self.checkpoint {
            check_default_provider(
                file,
                "checkpoint.default_provider",
                &checkpoint.default_provider,
                &checkpoint.providers,
            )?;
        }

        if let Some(audio) = &self.audio {
            check_default_provider(file, "audio.default_provider", &audio.default_provider, &audio.providers)?;
        }

        if let Some(codebase) = &self.codebase {
            for (name, resource) in &codebase.resources {
                check_file_matches(file, &format!("codebase.resources.{}.items", name), resource.items())?;
            }
        }

        if let Some(database) = &self.database {
            for provider in &database.default.providers {
                if !database.providers.contains_key(provider) {
                    return Err(ConfigError::schema(
                        file,
                        "database.default.providers",
                        format!("unknown database provider '{}'", provider),
                    ));
                }
            }
        }

        if let Some(sandbox) = &self.sandbox {
            if let Some(provider) = &sandbox.default.provider {
                check_default_provider(file, "sandbox.default.provider", provider, &sandbox.providers)?;
            }
        }

        if let Some(auth) = self.web_host.as_ref().and_then(|w| w.auth.as_ref()) {
            for (user, credentials) in &auth.users {
                if credentials.password.is_none() && credentials.bearer_token.is_none() {
                    return Err(ConfigError::schema(
                        file,
                        format!("web_host.auth.users.{}", user),
                        "a user needs a password or a bearer_token",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn check_default_provider<T>(
    file: &Path,
    path: &str,
    name: &str,
    providers: &BTreeMap<String, T>,
) -> Result<()> {
    if providers.contains_key(name) {
        Ok(())
    } else {
        Err(ConfigError::schema(file, path, format!("unknown provider '{}'", name)))
    }
}

fn check_file_matches(file: &Path, path: &str, matches: &[FileMatch]) -> Result<()> {
    for (index, item) in matches.iter().enumerate() {
        for (field, pattern) in [("include", &item.include), ("exclude", &item.exclude)] {
            if let Some(pattern) = pattern {
                Regex::new(pattern).map_err(|e| {
                    ConfigError::schema(file, format!("{}[{}].{}", path, index, field), e.to_string())
                })?;
            }
        }
    }
    Ok(())
}
