use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
[defaults]
agent = "code"
model = "LocalLLama:qwen3-7b"

[models.LocalLLama]
provider = "openai_compatible"
base_url = "http://127.0.0.1:11434/v1"
api_key = "sk-very-secret"

[models.OpenRouter]
provider = "openrouter"
api_key_env = "OPENROUTER_API_KEY"
"#;

fn tr_coder() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tr-coder"));
    cmd.env_remove("TR_CODER_SOURCE").env_remove("TR_CODER_LOG");
    cmd
}

fn project_with_config() -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".tokenring");
    fs::create_dir(&config_dir).unwrap();
    fs::write(config_dir.join("coder-config.toml"), CONFIG).unwrap();
    temp
}

#[test]
fn test_help_output() {
    tr_coder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TokenRing Coder - AI-powered coding assistant"))
        .stdout(predicate::str::contains("--httpPassword"))
        .stdout(predicate::str::contains("--initialize"));
}

#[test]
fn test_version_output() {
    tr_coder()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tr-coder "));
}

#[test]
fn test_initialize_then_run_headless() {
    let temp = TempDir::new().unwrap();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["--initialize", "--ui", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("Installed 42 plugins"))
        .stdout(predicate::str::contains("Running headless"));

    assert!(temp.path().join(".tokenring/coder-config.toml").is_file());
    assert!(temp.path().join(".tokenring/.gitignore").is_file());
    assert!(!temp.path().join(".tokenring/coder-database.sqlite").exists());
}

#[test]
fn test_missing_config_suggests_initialize() {
    let temp = TempDir::new().unwrap();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[ERR]"))
        .stderr(predicate::str::contains("--initialize"));

    assert!(!temp.path().join(".tokenring").exists());
}

#[test]
fn test_nonexistent_source_fails_without_creating_anything() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    tr_coder()
        .arg("--source")
        .arg(&missing)
        .arg("--initialize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory not found"));

    assert!(!missing.exists());
}

#[test]
fn test_source_from_environment() {
    let temp = project_with_config();

    tr_coder()
        .env("TR_CODER_SOURCE", temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_lists_providers_and_missing_keys() {
    let temp = project_with_config();

    tr_coder()
        .env_remove("OPENROUTER_API_KEY")
        .env_remove("FORCE_COLOR")
        .env_remove("CLICOLOR_FORCE")
        .arg("--source")
        .arg(temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "LocalLLama (openai_compatible) http://127.0.0.1:11434/v1",
        ))
        .stdout(predicate::str::contains("OpenRouter (openrouter)"))
        .stdout(predicate::str::contains(
            "[WARN] No API key resolved for models.OpenRouter",
        ))
        .stdout(predicate::str::contains("models.LocalLLama").not())
        // Piped output carries no ANSI escapes
        .stdout(predicate::str::contains("[OK] Configuration is valid"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_invalid_http_port() {
    let temp = project_with_config();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["--http", "localhost:notaport", "--ui", "none"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid port number"));
}

#[test]
fn test_http_with_auth() {
    let temp = project_with_config();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["--http", "--httpBearer", "admin:token", "--ui", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Web host on 127.0.0.1:random port (1 user(s))"));
}

#[test]
fn test_config_validate_reports_schema_path() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".tokenring");
    fs::create_dir(&config_dir).unwrap();
    fs::write(
        config_dir.join("coder-config.toml"),
        "[defaults]\nagent = \"code\"\nmodel = \"x\"\n\n[models.Bad]\nprovider = \"azure\"\n",
    )
    .unwrap();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"))
        .stderr(predicate::str::contains("models.Bad.base_url"));
}

#[test]
fn test_config_show_masks_secrets() {
    let temp = project_with_config();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OPENROUTER_API_KEY"))
        .stdout(predicate::str::contains("coder-database.sqlite"))
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_agents_list_without_config() {
    let temp = TempDir::new().unwrap();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning & Management"))
        .stdout(predicate::str::contains("system-architect"));
}

#[test]
fn test_agents_show() {
    tr_coder()
        .arg("--source")
        .arg(TempDir::new().unwrap().path())
        .args(["agents", "show", "code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive Code Agent"));

    tr_coder()
        .arg("--source")
        .arg(TempDir::new().unwrap().path())
        .args(["agents", "show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_models_classify_from_file() {
    let temp = project_with_config();
    let listing = temp.path().join("models.json");
    fs::write(
        &listing,
        r#"{"models": [
            {"name": "hf.co/myorg/qwen3-7b:latest"},
            {"name": "nomic-embed-text:latest"}
        ]}"#,
    )
    .unwrap();

    let output = tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["models", "classify", "LocalLLama", "--file"])
        .arg(&listing)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let classified: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(classified[0]["type"], "chat");
    assert_eq!(classified[0]["capabilities"]["contextLength"], 128000);
    assert_eq!(classified[1]["type"], "embedding");
    assert_eq!(classified[1]["capabilities"]["alwaysHot"], true);
}

#[test]
fn test_models_classify_aggregator_from_stdin() {
    let temp = project_with_config();

    let output = tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["models", "classify", "OpenRouter"])
        .write_stdin(
            r#"{"data": [
                {"id": "qwen/qwen3-coder", "supported_parameters": ["tools"]},
                {"id": "qwen/qwen3-32b"},
                {"id": "anthropic/claude-sonnet-4", "supported_parameters": ["tools"]}
            ]}"#,
        )
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let classified: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(classified.as_array().unwrap().len(), 1);
    assert_eq!(classified[0]["id"], "qwen/qwen3-coder");
}

#[test]
fn test_models_classify_unknown_provider() {
    let temp = project_with_config();

    tr_coder()
        .arg("--source")
        .arg(temp.path())
        .args(["models", "classify", "Nope"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LocalLLama"));
}
