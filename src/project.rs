use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".tokenring";

/// File name of the checkpoint database inside the configuration directory.
pub const CHECKPOINT_DB_NAME: &str = "coder-database.sqlite";

/// The working directory tr-coder operates on.
#[derive(Debug, Clone)]
pub struct SourceDir {
    root: PathBuf,
}

impl SourceDir {
    /// Resolve the `--source` argument to an absolute, existing directory.
    ///
    /// Performs no filesystem mutation, so a failed resolution never leaves a
    /// `.tokenring` directory behind.
    pub fn resolve(path: &Path) -> Result<Self> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !absolute.exists() {
            return Err(ConfigError::SourceNotFound(absolute));
        }

        // Canonicalize to resolve any .. or symlinks
        let root = absolute.canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<source>/.tokenring`
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR_NAME)
    }

    /// `<source>/.tokenring/coder-database.sqlite`
    pub fn checkpoint_database(&self) -> PathBuf {
        self.config_dir().join(CHECKPOINT_DB_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_existing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceDir::resolve(temp.path()).unwrap();

        assert_eq!(source.root(), temp.path().canonicalize().unwrap());
        assert!(source.config_dir().ends_with(".tokenring"));
        assert!(source
            .checkpoint_database()
            .ends_with(".tokenring/coder-database.sqlite"));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("does-not-exist");

        let err = SourceDir::resolve(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::SourceNotFound(_)));
        assert!(err.to_string().contains("Source directory not found"));
        assert!(!missing.join(".tokenring").exists());
    }
}
