//! Raw model-listing entries as returned by provider `/models` endpoints.

use serde::Deserialize;
use serde_json::Value;

/// One entry of a provider model list.
///
/// Covers OpenAI-compatible `{id}`, Ollama-style `{name, model, details}` and
/// OpenRouter's `{id, supported_parameters, context_length, pricing}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelListing {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub supported_parameters: Option<Vec<String>>,

    #[serde(default)]
    pub context_length: Option<u64>,

    #[serde(default)]
    pub pricing: Option<Pricing>,

    #[serde(default)]
    pub details: Option<Value>,
}

/// Per-token USD prices. OpenRouter sends these as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub prompt: Option<Value>,

    #[serde(default)]
    pub completion: Option<Value>,
}

impl Pricing {
    pub fn prompt_per_million(&self) -> Option<f64> {
        self.prompt.as_ref().and_then(per_million)
    }

    pub fn completion_per_million(&self) -> Option<f64> {
        self.completion.as_ref().and_then(per_million)
    }
}

fn per_million(value: &Value) -> Option<f64> {
    let per_token = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (per_token >= 0.0).then_some(per_token * 1_000_000.0)
}

impl ModelListing {
    /// Parse a listing entry. Malformed input yields an empty listing rather
    /// than an error.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Model identifier, preferring `id`, then `model`, then `name`.
    pub fn identifier(&self) -> Option<&str> {
        [&self.id, &self.model, &self.name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }

    pub fn supports_tools(&self) -> bool {
        self.supported_parameters
            .as_ref()
            .is_some_and(|params| params.iter().any(|p| p == "tools"))
    }
}

/// Extract listing entries from a model-list document.
///
/// Accepts a bare array, an OpenAI `{"data": [...]}` envelope or an Ollama
/// `{"models": [...]}` envelope. Anything else yields no entries.
pub fn listing_entries(document: &Value) -> Vec<ModelListing> {
    let entries = match document {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data").or_else(|| map.get("models")) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    entries.iter().map(ModelListing::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_precedence() {
        let ollama = ModelListing::from_value(&json!({
            "name": "qwen3:latest",
            "model": "qwen3:8b",
            "details": {"family": "qwen3"}
        }));
        assert_eq!(ollama.identifier(), Some("qwen3:8b"));

        let openai = ModelListing::from_value(&json!({"id": "gpt-4.1", "object": "model"}));
        assert_eq!(openai.identifier(), Some("gpt-4.1"));
    }

    #[test]
    fn test_malformed_entry_is_empty() {
        let listing = ModelListing::from_value(&json!({"id": 42}));
        assert_eq!(listing.identifier(), None);

        let listing = ModelListing::from_value(&json!("not an object"));
        assert_eq!(listing.identifier(), None);
    }

    #[test]
    fn test_pricing_per_million() {
        let listing = ModelListing::from_value(&json!({
            "id": "mistralai/mistral-large",
            "pricing": {"prompt": "0.000002", "completion": 0.000006}
        }));
        let pricing = listing.pricing.unwrap();
        assert!((pricing.prompt_per_million().unwrap() - 2.0).abs() < 1e-9);
        assert!((pricing.completion_per_million().unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_listing_entries_envelopes() {
        let openai = json!({"object": "list", "data": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(listing_entries(&openai).len(), 2);

        let ollama = json!({"models": [{"name": "llama3:latest"}]});
        assert_eq!(listing_entries(&ollama).len(), 1);

        assert_eq!(listing_entries(&json!([{"id": "x"}])).len(), 1);
        assert!(listing_entries(&json!({"unexpected": true})).is_empty());
    }
}
