//! Finding or creating `.tokenring/coder-config.*`.

use super::ConfigFormat;
use crate::error::{ConfigError, Result};
use crate::project::SourceDir;
use crate::utils::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_STEM: &str = "coder-config";

const CONFIG_TEMPLATE: &str = include_str!("../../templates/coder-config.toml");

const GITIGNORE: &str = "# Ignore database files\n*.db\n*.sqlite\n";

/// Probe `config_dir` for a config file, in [`ConfigFormat::PRIORITY`] order.
pub fn find_config(config_dir: &Path) -> Option<PathBuf> {
    ConfigFormat::PRIORITY.into_iter().find_map(|format| {
        let candidate = config_dir.join(format!("{}.{}", CONFIG_FILE_STEM, format.extension()));
        debug!(path = %candidate.display(), "probing for config file");
        candidate.is_file().then_some(candidate)
    })
}

/// Scaffold `config_dir` with the template config and a `.gitignore`.
///
/// Returns the path of the new config file. Files written before a failure
/// are left in place.
pub fn initialize(config_dir: &Path) -> Result<PathBuf> {
    let failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConfigError::InitializationFailure { path, source }
    };

    if !config_dir.exists() {
        println!(
            "{}",
            style::info(format!("Creating {}", config_dir.display()))
        );
        fs::create_dir_all(config_dir).map_err(failed(config_dir))?;
    }

    if !config_dir.is_dir() {
        return Err(ConfigError::NotADirectory(config_dir.to_path_buf()));
    }

    let config_file = config_dir.join(format!(
        "{}.{}",
        CONFIG_FILE_STEM,
        ConfigFormat::Toml.extension()
    ));
    println!(
        "{}",
        style::success(format!("Writing example config to {}", config_file.display()))
    );
    fs::write(&config_file, CONFIG_TEMPLATE).map_err(failed(&config_file))?;

    let gitignore = config_dir.join(".gitignore");
    println!("{}", style::success("Creating .gitignore"));
    fs::write(&gitignore, GITIGNORE).map_err(failed(&gitignore))?;

    Ok(config_file)
}

/// Decide which config file to load.
///
/// An explicit path wins. Otherwise the source's config directory is probed,
/// and scaffolded when `initialize` is set.
pub fn resolve_config_path(
    source: &SourceDir,
    explicit: Option<&Path>,
    initialize: bool,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        if !path.is_file() {
            return Err(ConfigError::InvalidOption {
                option: "--config",
                message: format!("{} does not exist", path.display()),
            });
        }
        return Ok(path);
    }

    let config_dir = source.config_dir();
    if let Some(found) = find_config(&config_dir) {
        return Ok(found);
    }

    if initialize {
        return self::initialize(&config_dir);
    }

    Err(ConfigError::ConfigMissing {
        source_dir: source.root().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoderConfig;

    #[test]
    fn test_find_config_priority() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(find_config(temp.path()), None);

        fs::write(temp.path().join("coder-config.json"), "{}").unwrap();
        assert_eq!(
            find_config(temp.path()),
            Some(temp.path().join("coder-config.json"))
        );

        fs::write(temp.path().join("coder-config.toml"), "").unwrap();
        assert_eq!(
            find_config(temp.path()),
            Some(temp.path().join("coder-config.toml"))
        );
    }

    #[test]
    fn test_initialize_writes_template_and_gitignore() {
        let temp = tempfile::tempdir().unwrap();
        let config_dir = temp.path().join(".tokenring");

        let config_file = initialize(&config_dir).unwrap();

        assert_eq!(config_file, config_dir.join("coder-config.toml"));
        let mut entries: Vec<_> = fs::read_dir(&config_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        entries.sort();
        assert_eq!(entries, vec![".gitignore", "coder-config.toml"]);
        assert_eq!(
            fs::read_to_string(config_dir.join(".gitignore")).unwrap(),
            "# Ignore database files\n*.db\n*.sqlite\n"
        );
    }

    #[test]
    fn test_template_is_valid_config() {
        let config = CoderConfig::parse(
            CONFIG_TEMPLATE,
            ConfigFormat::Toml,
            Path::new("coder-config.toml"),
        )
        .unwrap();
        assert_eq!(config.defaults.agent, "code");
    }

    #[test]
    fn test_initialize_rejects_file_in_place_of_directory() {
        let temp = tempfile::tempdir().unwrap();
        let config_dir = temp.path().join(".tokenring");
        fs::write(&config_dir, "not a directory").unwrap();

        let err = initialize(&config_dir).unwrap_err();
        assert!(matches!(err, ConfigError::NotADirectory(_)));
    }

    #[test]
    fn test_resolve_missing_config() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceDir::resolve(temp.path()).unwrap();

        let err = resolve_config_path(&source, None, false).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigMissing { .. }));
        assert!(err.to_string().contains("--initialize"));
        assert!(!source.config_dir().exists());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let temp = tempfile::tempdir().unwrap();
        let source = SourceDir::resolve(temp.path()).unwrap();
        let explicit = temp.path().join("elsewhere.toml");

        let err = resolve_config_path(&source, Some(&explicit), true).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { option: "--config", .. }));
        assert!(!source.config_dir().exists());

        fs::write(&explicit, "").unwrap();
        assert_eq!(
            resolve_config_path(&source, Some(&explicit), true).unwrap(),
            explicit
        );
    }
}
