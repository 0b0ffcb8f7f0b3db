//! Built-in defaults and the merged, effective configuration.

use super::sections::*;
use super::CoderConfig;
use crate::agents::{AgentDefinition, AgentRegistry};
use crate::error::{ConfigError, Result};
use crate::project::SourceDir;
use crate::version;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sections every run has, whether or not the user configures them.
#[derive(Debug, Clone)]
pub struct BuiltinDefaults {
    pub filesystem: FilesystemSection,
    pub checkpoint: CheckpointSection,
    pub audio: AudioSection,
    pub cli: CliSection,
    pub ink_cli: CliSection,
    pub file_index: FileIndexSection,
    pub web_host: Option<WebHostSection>,
}

impl BuiltinDefaults {
    /// Defaults rooted at `source`. `web_host` comes from `--http`.
    pub fn for_source(source: &SourceDir, web_host: Option<WebHostSection>) -> Self {
        let filesystem = FilesystemSection {
            default: FilesystemDefaults {
                provider: Some("local".to_string()),
                selected_files: Vec::new(),
            },
            providers: BTreeMap::from([(
                "local".to_string(),
                FilesystemProvider::Local {
                    base_directory: source.root().to_path_buf(),
                    indexed_files: vec![FileMatch {
                        path: "./".to_string(),
                        include: None,
                        exclude: None,
                    }],
                    watched_files: vec![FileMatch {
                        path: "./".to_string(),
                        include: None,
                        exclude: None,
                    }],
                },
            )]),
        };

        let checkpoint = CheckpointSection {
            default_provider: "sqlite".to_string(),
            providers: BTreeMap::from([(
                "sqlite".to_string(),
                CheckpointProvider::Sqlite {
                    database_path: source.checkpoint_database(),
                },
            )]),
        };

        let audio = AudioSection {
            default_provider: "linux".to_string(),
            providers: BTreeMap::from([("linux".to_string(), AudioProvider::Linux)]),
        };

        let cli = CliSection {
            banner_narrow: version::BANNER_NARROW.to_string(),
            banner_wide: version::BANNER_WIDE.to_string(),
            banner_compact: version::banner_compact(),
        };

        let file_index = FileIndexSection {
            providers: BTreeMap::from([("ephemeral".to_string(), FileIndexProvider::Ephemeral)]),
        };

        Self {
            filesystem,
            checkpoint,
            audio,
            ink_cli: cli.clone(),
            cli,
            file_index,
            web_host,
        }
    }
}

/// The effective configuration handed to the plugin manager.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    #[serde(skip)]
    pub source_root: PathBuf,
    #[serde(skip)]
    pub config_file: PathBuf,

    pub defaults: DefaultsSection,
    pub models: BTreeMap<String, ModelProviderConfig>,
    pub agents: BTreeMap<String, AgentDefinition>,

    pub filesystem: FilesystemSection,
    pub checkpoint: CheckpointSection,
    pub audio: AudioSection,
    pub cli: CliSection,
    pub ink_cli: CliSection,
    pub file_index: FileIndexSection,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_host: Option<WebHostSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codebase: Option<CodebaseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testing: Option<TestingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<SandboxSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websearch: Option<BTreeMap<String, WebSearchProvider>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpSection>,
}

impl ResolvedConfig {
    /// Shallow merge: a section the user defines replaces the default section
    /// wholesale. Agents merge per key, user entries winning.
    pub fn merge(
        user: CoderConfig,
        defaults: BuiltinDefaults,
        builtin_agents: &AgentRegistry,
        source_root: &Path,
        config_file: &Path,
    ) -> Result<Self> {
        let agents = builtin_agents.merged_with(&user.agents);

        if !agents.contains_key(&user.defaults.agent) {
            return Err(ConfigError::schema(
                config_file,
                "defaults.agent",
                format!("unknown agent '{}'", user.defaults.agent),
            ));
        }

        for (id, agent) in &agents {
            crate::agents::validate_agent(id, agent)?;
        }

        Ok(Self {
            source_root: source_root.to_path_buf(),
            config_file: config_file.to_path_buf(),
            defaults: user.defaults,
            models: user.models,
            agents,
            filesystem: user.filesystem.unwrap_or(defaults.filesystem),
            checkpoint: user.checkpoint.unwrap_or(defaults.checkpoint),
            audio: user.audio.unwrap_or(defaults.audio),
            cli: user.cli.unwrap_or(defaults.cli),
            ink_cli: user.ink_cli.unwrap_or(defaults.ink_cli),
            file_index: user.file_index.unwrap_or(defaults.file_index),
            web_host: user.web_host.or(defaults.web_host),
            codebase: user.codebase,
            testing: user.testing,
            database: user.database,
            sandbox: user.sandbox,
            websearch: user.websearch,
            aws: user.aws,
            docker: user.docker,
            mcp: user.mcp,
        })
    }

    /// Whether a top-level section carries any settings.
    pub fn has_section(&self, key: &str) -> bool {
        match key {
            "defaults" | "filesystem" | "checkpoint" | "audio" | "cli" | "ink_cli"
            | "file_index" => true,
            "models" => !self.models.is_empty(),
            "agents" => !self.agents.is_empty(),
            "web_host" => self.web_host.is_some(),
            "codebase" => self.codebase.is_some(),
            "testing" => self.testing.is_some(),
            "database" => self.database.is_some(),
            "sandbox" => self.sandbox.is_some(),
            "websearch" => self.websearch.is_some(),
            "aws" => self.aws.is_some(),
            "docker" => self.docker.is_some(),
            "mcp" => self.mcp.is_some(),
            _ => false,
        }
    }

    /// Providers that need an API key but resolve none, inline or from the
    /// environment, as dotted config paths.
    pub fn missing_credentials(&self) -> Vec<String> {
        let models = self
            .models
            .iter()
            .filter(|(_, p)| p.requires_api_key() && p.api_key().is_none())
            .map(|(name, _)| format!("models.{}", name));
        let search = self
            .websearch
            .iter()
            .flatten()
            .filter(|(_, p)| p.requires_api_key() && p.api_key().is_none())
            .map(|(name, _)| format!("websearch.{}", name));
        models.chain(search).collect()
    }

    /// Copy with inline secrets replaced, for display.
    pub fn redacted(&self) -> Self {
        const MASK: &str = "********";
        let mask = |value: &mut Option<String>| {
            if value.is_some() {
                *value = Some(MASK.to_string());
            }
        };

        let mut copy = self.clone();
        for provider in copy.models.values_mut() {
            match provider {
                ModelProviderConfig::OpenAiCompatible(p) | ModelProviderConfig::Ollama(p) => {
                    mask(&mut p.api_key)
                }
                ModelProviderConfig::OpenRouter(p) => mask(&mut p.api_key),
                ModelProviderConfig::Anthropic(p)
                | ModelProviderConfig::Azure(p)
                | ModelProviderConfig::Cerebras(p)
                | ModelProviderConfig::DeepSeek(p)
                | ModelProviderConfig::Google(p)
                | ModelProviderConfig::Groq(p)
                | ModelProviderConfig::OpenAi(p)
                | ModelProviderConfig::Perplexity(p)
                | ModelProviderConfig::Xai(p) => mask(&mut p.api_key),
            }
        }
        for provider in copy.websearch.iter_mut().flat_map(|w| w.values_mut()) {
            match provider {
                WebSearchProvider::Serper { api_key, .. }
                | WebSearchProvider::Scraperapi { api_key, .. } => mask(api_key),
                WebSearchProvider::Chrome { .. } => {}
            }
        }
        for provider in copy.database.iter_mut().flat_map(|d| d.providers.values_mut()) {
            let DatabaseProvider::Mysql { password, .. } = provider;
            mask(password);
        }
        if let Some(aws) = &mut copy.aws {
            mask(&mut aws.secret_access_key);
            mask(&mut aws.session_token);
        }
        for user in copy
            .web_host
            .iter_mut()
            .flat_map(|w| w.auth.iter_mut())
            .flat_map(|a| a.users.values_mut())
        {
            mask(&mut user.password);
            mask(&mut user.bearer_token);
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    fn user_config(extra: &str) -> CoderConfig {
        let contents = format!(
            "[defaults]\nagent = \"code\"\nmodel = \"OpenAI:gpt-4.1\"\n\n[models.OpenAI]\nprovider = \"openai\"\n{}",
            extra
        );
        CoderConfig::parse(&contents, ConfigFormat::Toml, Path::new("coder-config.toml")).unwrap()
    }

    fn merge(user: CoderConfig, web_host: Option<WebHostSection>) -> Result<ResolvedConfig> {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceDir::resolve(temp.path()).unwrap();
        let registry = AgentRegistry::load().unwrap();
        ResolvedConfig::merge(
            user,
            BuiltinDefaults::for_source(&source, web_host),
            &registry,
            source.root(),
            Path::new("coder-config.toml"),
        )
    }

    #[test]
    fn test_defaults_rooted_at_source() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceDir::resolve(temp.path()).unwrap();
        let defaults = BuiltinDefaults::for_source(&source, None);

        match &defaults.filesystem.providers["local"] {
            FilesystemProvider::Local { base_directory, .. } => {
                assert_eq!(base_directory, source.root())
            }
            other => panic!("unexpected provider {:?}", other),
        }
        assert_eq!(
            defaults.checkpoint.providers["sqlite"],
            CheckpointProvider::Sqlite {
                database_path: source.root().join(".tokenring/coder-database.sqlite")
            }
        );
        assert!(defaults.web_host.is_none());
        assert!(!source.config_dir().exists());
    }

    #[test]
    fn test_user_section_replaces_default_wholesale() {
        let resolved = merge(
            user_config(
                "\n[filesystem.providers.archive]\ntype = \"s3\"\nbucket = \"backups\"\n",
            ),
            None,
        )
        .unwrap();

        assert_eq!(resolved.filesystem.providers.len(), 1);
        assert!(resolved.filesystem.providers.contains_key("archive"));
        assert_eq!(resolved.checkpoint.default_provider, "sqlite");
    }

    #[test]
    fn test_user_web_host_wins_over_flag() {
        let flag = WebHostSection {
            host: "127.0.0.1".to_string(),
            port: None,
            auth: None,
        };
        let resolved = merge(
            user_config("\n[web_host]\nhost = \"0.0.0.0\"\nport = 8080\n"),
            Some(flag.clone()),
        )
        .unwrap();
        assert_eq!(resolved.web_host.as_ref().unwrap().port, Some(8080));

        let resolved = merge(user_config(""), Some(flag.clone())).unwrap();
        assert_eq!(resolved.web_host, Some(flag));
    }

    #[test]
    fn test_unknown_default_agent() {
        let mut user = user_config("");
        user.defaults.agent = "ghost".to_string();
        let err = merge(user, None).unwrap_err();
        match err {
            ConfigError::SchemaViolation { path, .. } => assert_eq!(path, "defaults.agent"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_missing_credentials() {
        let resolved = merge(
            user_config(concat!(
                "\n[models.Local]\nprovider = \"ollama\"\nbase_url = \"http://localhost:11434\"\n",
                "\n[websearch.serper]\ntype = \"serper\"\napi_key = \"serp\"\n",
                "\n[websearch.scraper]\ntype = \"scraperapi\"\napi_key_env = \"TR_CODER_TEST_UNSET_SCRAPER_KEY\"\n",
                "\n[websearch.browser]\ntype = \"chrome\"\n",
            )),
            None,
        )
        .unwrap();

        assert_eq!(
            resolved.missing_credentials(),
            ["models.OpenAI", "websearch.scraper"]
        );
    }

    #[test]
    fn test_redacted_masks_inline_secrets() {
        let resolved = merge(
            user_config(
                "api_key = \"sk-live\"\n\n[websearch.serper]\ntype = \"serper\"\napi_key = \"serp\"\n",
            ),
            None,
        )
        .unwrap();
        let shown = serde_json::to_string(&resolved.redacted()).unwrap();
        assert!(!shown.contains("sk-live"));
        assert!(!shown.contains("serp\""));
        assert!(shown.contains("********"));
    }
}
