use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{} is not a directory, aborting", .0.display())]
    NotADirectory(PathBuf),

    #[error(
        "Source directory {} does not contain a .tokenring/coder-config.{{toml,json}} file.\n\
         You can create one by adding --initialize:\n\
         tr-coder --source {} --initialize",
        .source_dir.display(),
        .source_dir.display()
    )]
    ConfigMissing { source_dir: PathBuf },

    #[error("Invalid configuration in {}: {path}: {message}", .file.display())]
    SchemaViolation {
        file: PathBuf,
        path: String,
        message: String,
    },

    #[error("Config parse error in {}: {message}", .file.display())]
    ConfigParse { file: PathBuf, message: String },

    #[error("Unsupported config format: {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Initialization failed: {}: {source}", .path.display())]
    InitializationFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid option {option}: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    #[error("Plugin '{0}' is already installed")]
    PluginConflict(String),

    #[error("Invalid agent definition '{id}': {message}")]
    InvalidAgent { id: String, message: String },

    #[error("Failed to render {what}: {message}")]
    Render { what: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn schema(file: impl Into<PathBuf>, path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SchemaViolation {
            file: file.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
