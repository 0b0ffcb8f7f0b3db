//! Typed configuration sections.
//!
//! Every provider table selects its implementation through a `type` tag
//! (`provider` for model providers) and each variant carries only the fields
//! that implementation needs.

use crate::models::{
    AggregatorFilter, AggregatorFilterConfig, FamilyRule, FamilyTable, ModelInferrer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Read an API key either inline or from the named environment variable.
fn resolve_secret(inline: &Option<String>, env: &Option<String>) -> Option<String> {
    inline
        .clone()
        .or_else(|| env.as_ref().and_then(|name| std::env::var(name).ok()))
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsSection {
    /// Agent started when the CLI launches
    pub agent: String,

    /// Default model, as "<provider>:<model>"
    pub model: String,

    #[serde(default)]
    pub tools: Vec<String>,
}

// ---------------------------------------------------------------------------
// Model providers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum ModelProviderConfig {
    #[serde(rename = "anthropic")]
    Anthropic(HostedProvider),
    #[serde(rename = "azure")]
    Azure(HostedProvider),
    #[serde(rename = "cerebras")]
    Cerebras(HostedProvider),
    #[serde(rename = "deepseek")]
    DeepSeek(HostedProvider),
    #[serde(rename = "google")]
    Google(HostedProvider),
    #[serde(rename = "groq")]
    Groq(HostedProvider),
    #[serde(rename = "openai")]
    OpenAi(HostedProvider),
    #[serde(rename = "perplexity")]
    Perplexity(HostedProvider),
    #[serde(rename = "xai")]
    Xai(HostedProvider),
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible(SelfHostedProvider),
    #[serde(rename = "ollama")]
    Ollama(SelfHostedProvider),
    #[serde(rename = "openrouter")]
    OpenRouter(AggregatorProvider),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostedProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelfHostedProvider {
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Replaces the built-in family table for this provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<FamilyRule>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregatorProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default)]
    pub model_filter: AggregatorFilterConfig,
}

impl ModelProviderConfig {
    /// The `provider` tag
    pub fn kind(&self) -> &'static str {
        match self {
            ModelProviderConfig::Anthropic(_) => "anthropic",
            ModelProviderConfig::Azure(_) => "azure",
            ModelProviderConfig::Cerebras(_) => "cerebras",
            ModelProviderConfig::DeepSeek(_) => "deepseek",
            ModelProviderConfig::Google(_) => "google",
            ModelProviderConfig::Groq(_) => "groq",
            ModelProviderConfig::OpenAi(_) => "openai",
            ModelProviderConfig::Perplexity(_) => "perplexity",
            ModelProviderConfig::Xai(_) => "xai",
            ModelProviderConfig::OpenAiCompatible(_) => "openai_compatible",
            ModelProviderConfig::Ollama(_) => "ollama",
            ModelProviderConfig::OpenRouter(_) => "openrouter",
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        match self {
            ModelProviderConfig::OpenAiCompatible(p) | ModelProviderConfig::Ollama(p) => {
                Some(p.base_url.as_str())
            }
            ModelProviderConfig::OpenRouter(_) => None,
            ModelProviderConfig::Anthropic(p)
            | ModelProviderConfig::Azure(p)
            | ModelProviderConfig::Cerebras(p)
            | ModelProviderConfig::DeepSeek(p)
            | ModelProviderConfig::Google(p)
            | ModelProviderConfig::Groq(p)
            | ModelProviderConfig::OpenAi(p)
            | ModelProviderConfig::Perplexity(p)
            | ModelProviderConfig::Xai(p) => p.base_url.as_deref(),
        }
    }

    /// Self-hosted endpoints may run without a key
    pub fn requires_api_key(&self) -> bool {
        !matches!(
            self,
            ModelProviderConfig::OpenAiCompatible(_) | ModelProviderConfig::Ollama(_)
        )
    }

    /// Resolved API key, if any
    pub fn api_key(&self) -> Option<String> {
        match self {
            ModelProviderConfig::OpenAiCompatible(p) | ModelProviderConfig::Ollama(p) => {
                resolve_secret(&p.api_key, &p.api_key_env)
            }
            ModelProviderConfig::OpenRouter(p) => resolve_secret(&p.api_key, &p.api_key_env),
            ModelProviderConfig::Anthropic(p)
            | ModelProviderConfig::Azure(p)
            | ModelProviderConfig::Cerebras(p)
            | ModelProviderConfig::DeepSeek(p)
            | ModelProviderConfig::Google(p)
            | ModelProviderConfig::Groq(p)
            | ModelProviderConfig::OpenAi(p)
            | ModelProviderConfig::Perplexity(p)
            | ModelProviderConfig::Xai(p) => resolve_secret(&p.api_key, &p.api_key_env),
        }
    }

    /// Build the capability inferrer for this provider's model listings.
    pub fn inferrer(&self) -> Result<ModelInferrer, String> {
        match self {
            ModelProviderConfig::OpenAiCompatible(p) | ModelProviderConfig::Ollama(p) => {
                let builtin = FamilyTable::builtin()?;
                let embedding = p
                    .embedding_pattern
                    .clone()
                    .unwrap_or_else(|| builtin.embedding_pattern().to_string());
                let table = match &p.families {
                    Some(rules) => FamilyTable::compile(&embedding, rules)?,
                    None if p.embedding_pattern.is_some() => {
                        FamilyTable::compile(&embedding, &FamilyTable::builtin_rules()?)?
                    }
                    None => builtin,
                };
                Ok(ModelInferrer::new(table, None))
            }
            ModelProviderConfig::OpenRouter(p) => {
                let filter = AggregatorFilter::compile(&p.model_filter)?;
                Ok(ModelInferrer::new(FamilyTable::builtin()?, Some(filter)))
            }
            _ => ModelInferrer::builtin(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filesystem, checkpoint, audio
// ---------------------------------------------------------------------------

/// A path plus optional include/exclude regular expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMatch {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemSection {
    #[serde(default)]
    pub default: FilesystemDefaults,

    pub providers: BTreeMap<String, FilesystemProvider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesystemDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default)]
    pub selected_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum FilesystemProvider {
    Local {
        base_directory: PathBuf,
        #[serde(default)]
        indexed_files: Vec<FileMatch>,
        #[serde(default)]
        watched_files: Vec<FileMatch>,
    },
    S3 {
        bucket: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckpointSection {
    pub default_provider: String,
    pub providers: BTreeMap<String, CheckpointProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum CheckpointProvider {
    Sqlite { database_path: PathBuf },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioSection {
    pub default_provider: String,
    pub providers: BTreeMap<String, AudioProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum AudioProvider {
    Linux,
}

// ---------------------------------------------------------------------------
// Front ends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliSection {
    #[serde(default)]
    pub banner_narrow: String,
    #[serde(default)]
    pub banner_wide: String,
    #[serde(default)]
    pub banner_compact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebHostSection {
    pub host: String,

    /// Unset means the web host picks a random port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WebAuth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebAuth {
    pub users: BTreeMap<String, WebUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Codebase, testing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDefaults {
    /// Resource names or globs selected on start
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodebaseSection {
    #[serde(default)]
    pub default: ResourceDefaults,
    pub resources: BTreeMap<String, CodebaseResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMatchResource {
    pub description: String,
    pub items: Vec<FileMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum CodebaseResource {
    FileTree(FileMatchResource),
    RepoMap(FileMatchResource),
    WholeFile(FileMatchResource),
}

impl CodebaseResource {
    pub fn items(&self) -> &[FileMatch] {
        match self {
            CodebaseResource::FileTree(r)
            | CodebaseResource::RepoMap(r)
            | CodebaseResource::WholeFile(r) => &r.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestingSection {
    #[serde(default)]
    pub default: ResourceDefaults,
    pub resources: BTreeMap<String, TestingResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum TestingResource {
    ShellTesting {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        description: String,
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        working_directory: Option<PathBuf>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_seconds: Option<u64>,
    },
}

// ---------------------------------------------------------------------------
// Database, sandbox, docker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    #[serde(default)]
    pub default: DatabaseDefaults,
    pub providers: BTreeMap<String, DatabaseProvider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseDefaults {
    #[serde(default)]
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum DatabaseProvider {
    Mysql {
        host: String,
        #[serde(default = "default_mysql_port")]
        port: u16,
        user: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password_env: Option<String>,
        database_name: String,
        #[serde(default)]
        allow_writes: bool,
    },
}

fn default_mysql_port() -> u16 {
    3306
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerSettings {
    /// Docker host, e.g. "unix:///var/run/docker.sock"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default)]
    pub tls_verify: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_key: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxSection {
    #[serde(default)]
    pub default: SandboxDefaults,
    pub providers: BTreeMap<String, SandboxProvider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum SandboxProvider {
    Docker(DockerSettings),
}

// ---------------------------------------------------------------------------
// Web search, file index, AWS, MCP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum WebSearchProvider {
    Serper {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key_env: Option<String>,
        /// Country code
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gl: Option<String>,
        /// Language code
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hl: Option<String>,
    },
    Scraperapi {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key_env: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country_code: Option<String>,
    },
    Chrome {
        #[serde(default)]
        headless: bool,
    },
}

impl WebSearchProvider {
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, WebSearchProvider::Chrome { .. })
    }

    pub fn api_key(&self) -> Option<String> {
        match self {
            WebSearchProvider::Serper {
                api_key,
                api_key_env,
                ..
            }
            | WebSearchProvider::Scraperapi {
                api_key,
                api_key_env,
                ..
            } => resolve_secret(api_key, api_key_env),
            WebSearchProvider::Chrome { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileIndexSection {
    pub providers: BTreeMap<String, FileIndexProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum FileIndexProvider {
    Ephemeral,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McpSection {
    pub transports: BTreeMap<String, McpTransport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum McpTransport {
    Stdio {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        env: BTreeMap<String, String>,
    },
    Sse {
        url: String,
    },
    Http {
        url: String,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
}
