use crate::app::{self, StartOptions};
use crate::cli::ModelsCommands;
use crate::error::{ConfigError, Result};
use crate::models::{listing_entries, Capabilities, ModelInferrer, ModelType};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One usable model and what was inferred about it.
#[derive(Debug, Serialize)]
pub struct ClassifiedModel {
    pub id: String,
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub capabilities: Capabilities,
}

pub fn execute(command: &ModelsCommands, options: &StartOptions) -> Result<()> {
    match command {
        ModelsCommands::Classify { provider, file } => classify(options, provider, file.as_deref()),
    }
}

fn classify(options: &StartOptions, provider: &str, file: Option<&Path>) -> Result<()> {
    let config = app::resolve_config(options)?;
    let provider_config = config.models.get(provider).ok_or_else(|| ConfigError::InvalidOption {
        option: "PROVIDER",
        message: format!(
            "no model provider '{}' (configured: {})",
            provider,
            config.models.keys().cloned().collect::<Vec<_>>().join(", ")
        ),
    })?;

    let inferrer = provider_config
        .inferrer()
        .map_err(|message| ConfigError::schema(&config.config_file, format!("models.{}", provider), message))?;

    let (source, contents) = read_listing(file)?;
    let document: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| ConfigError::ConfigParse {
            file: source,
            message: e.to_string(),
        })?;

    let classified = classify_document(&inferrer, &document);
    let rendered = serde_json::to_string_pretty(&classified).map_err(|e| ConfigError::Render {
        what: "model capabilities",
        message: e.to_string(),
    })?;
    println!("{}", rendered);
    Ok(())
}

fn read_listing(file: Option<&Path>) -> Result<(PathBuf, String)> {
    match file {
        Some(path) => Ok((path.to_path_buf(), std::fs::read_to_string(path)?)),
        None => {
            let mut contents = String::new();
            std::io::stdin().read_to_string(&mut contents)?;
            Ok((PathBuf::from("<stdin>"), contents))
        }
    }
}

/// Run the inferrer over every entry, skipping excluded and unnamed models.
pub fn classify_document(inferrer: &ModelInferrer, document: &serde_json::Value) -> Vec<ClassifiedModel> {
    listing_entries(document)
        .iter()
        .filter_map(|listing| {
            let id = listing.identifier()?.to_string();
            let descriptor = inferrer.infer(listing)?;
            Some(ClassifiedModel {
                id,
                model_type: descriptor.model_type,
                capabilities: descriptor.capabilities,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregatorFilter, AggregatorFilterConfig, FamilyTable};
    use serde_json::json;

    #[test]
    fn test_classify_document_skips_excluded_and_unnamed() {
        let filter = AggregatorFilter::compile(&AggregatorFilterConfig::default()).unwrap();
        let inferrer = ModelInferrer::new(FamilyTable::builtin().unwrap(), Some(filter));
        let document = json!({"data": [
            {"id": "qwen/qwen3-coder", "supported_parameters": ["tools"]},
            {"id": "qwen/qwen3-32b"},
            {"id": "openai/gpt-4.1", "supported_parameters": ["tools"]},
            {"supported_parameters": ["tools"]}
        ]});

        let classified = classify_document(&inferrer, &document);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].id, "qwen/qwen3-coder");
        assert_eq!(classified[0].capabilities.context_length, Some(128_000));
    }
}
