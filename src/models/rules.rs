//! Family rule tables and the aggregator filter.

use super::capability::{Capabilities, ModelCapabilityDescriptor, ModelType};
use super::listing::ModelListing;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Vendors already reachable through their native provider.
pub const DEFAULT_AGGREGATOR_BLOCKLIST: &str = "openai|anthropic|xai|perplexity|cerebras";

const BUILTIN_FAMILIES: &str = include_str!("../../models/families.toml");

/// A capability tuple attached to a model family pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyRule {
    pub name: String,

    /// Case-insensitive regular expression matched against the normalized id
    pub pattern: String,

    pub reasoning: u8,
    pub tools: u8,
    pub intelligence: u8,
    pub speed: u8,
    pub context_length: u64,

    /// Self-hosted models cost nothing per token
    #[serde(default)]
    pub cost_per_million_input_tokens: f64,

    #[serde(default)]
    pub cost_per_million_output_tokens: f64,
}

impl FamilyRule {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            reasoning: Some(self.reasoning),
            tools: Some(self.tools),
            intelligence: Some(self.intelligence),
            speed: Some(self.speed),
            context_length: Some(self.context_length),
            cost_per_million_input_tokens: Some(self.cost_per_million_input_tokens),
            cost_per_million_output_tokens: Some(self.cost_per_million_output_tokens),
            always_hot: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FamilyFile {
    embedding_pattern: String,
    #[serde(default)]
    family: Vec<FamilyRule>,
}

/// Strip a trailing `:latest` tag and a leading `hf.co/<org>/` prefix.
pub fn normalize_model_id(id: &str) -> &str {
    let id = id.strip_suffix(":latest").unwrap_or(id);
    match id.strip_prefix("hf.co/") {
        Some(rest) => match rest.split_once('/') {
            Some((_org, model)) => model,
            None => id,
        },
        None => id,
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Rules compiled and ready for matching.
#[derive(Debug, Clone)]
pub struct FamilyTable {
    embedding: Regex,
    rules: Vec<(FamilyRule, Regex)>,
}

impl FamilyTable {
    /// Compile a rule list. Errors name the offending rule.
    pub fn compile(embedding_pattern: &str, rules: &[FamilyRule]) -> Result<Self, String> {
        let embedding = case_insensitive(embedding_pattern)
            .map_err(|e| format!("invalid embedding pattern '{}': {}", embedding_pattern, e))?;

        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            for (tier, value) in [
                ("reasoning", rule.reasoning),
                ("tools", rule.tools),
                ("intelligence", rule.intelligence),
                ("speed", rule.speed),
            ] {
                if !(1..=3).contains(&value) {
                    return Err(format!(
                        "family '{}': {} tier {} outside 1..=3",
                        rule.name, tier, value
                    ));
                }
            }
            let regex = case_insensitive(&rule.pattern)
                .map_err(|e| format!("family '{}': invalid pattern: {}", rule.name, e))?;
            compiled.push((rule.clone(), regex));
        }

        Ok(Self {
            embedding,
            rules: compiled,
        })
    }

    /// Parse and compile the embedded default table.
    pub fn builtin() -> Result<Self, String> {
        let file: FamilyFile = toml::from_str(BUILTIN_FAMILIES).map_err(|e| e.to_string())?;
        FamilyTable::compile(&file.embedding_pattern, &file.family)
    }

    /// Rules of the embedded table, for overriding a subset in config.
    pub fn builtin_rules() -> Result<Vec<FamilyRule>, String> {
        let file: FamilyFile = toml::from_str(BUILTIN_FAMILIES).map_err(|e| e.to_string())?;
        Ok(file.family)
    }

    pub fn embedding_pattern(&self) -> &str {
        self.embedding.as_str()
    }

    /// Name of the first family matching `id`, if any.
    pub fn family_of(&self, id: &str) -> Option<&str> {
        let normalized = normalize_model_id(id);
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(normalized))
            .map(|(rule, _)| rule.name.as_str())
    }

    /// Classify a raw model identifier.
    pub fn classify(&self, id: &str) -> ModelCapabilityDescriptor {
        let normalized = normalize_model_id(id);

        if self.embedding.is_match(normalized) {
            return ModelCapabilityDescriptor {
                model_type: ModelType::Embedding,
                capabilities: Capabilities {
                    always_hot: Some(true),
                    ..Default::default()
                },
            };
        }

        let capabilities = self
            .rules
            .iter()
            .find(|(_, regex)| regex.is_match(normalized))
            .map(|(rule, _)| rule.capabilities())
            .unwrap_or_default();

        ModelCapabilityDescriptor {
            model_type: ModelType::Chat,
            capabilities,
        }
    }
}

/// Config-facing settings for aggregator providers (OpenRouter-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregatorFilterConfig {
    /// Drop models that do not advertise tool calling
    #[serde(default = "default_true")]
    pub require_tools: bool,

    /// Case-insensitive vendor blocklist pattern
    #[serde(default = "default_blocklist")]
    pub exclude: String,
}

fn default_true() -> bool {
    true
}

fn default_blocklist() -> String {
    DEFAULT_AGGREGATOR_BLOCKLIST.to_string()
}

impl Default for AggregatorFilterConfig {
    fn default() -> Self {
        Self {
            require_tools: true,
            exclude: default_blocklist(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorFilter {
    require_tools: bool,
    exclude: Option<Regex>,
}

impl AggregatorFilter {
    pub fn compile(config: &AggregatorFilterConfig) -> Result<Self, String> {
        let exclude = if config.exclude.trim().is_empty() {
            None
        } else {
            Some(
                case_insensitive(&config.exclude)
                    .map_err(|e| format!("invalid exclude pattern '{}': {}", config.exclude, e))?,
            )
        };
        Ok(Self {
            require_tools: config.require_tools,
            exclude,
        })
    }

    /// Whether the listing belongs in the usable model set.
    pub fn accepts(&self, listing: &ModelListing) -> bool {
        if self.require_tools && !listing.supports_tools() {
            return false;
        }
        match (listing.identifier(), &self.exclude) {
            (Some(id), Some(exclude)) => !exclude.is_match(id),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Per-provider inference: a family table plus an optional aggregator filter.
#[derive(Debug, Clone)]
pub struct ModelInferrer {
    families: FamilyTable,
    filter: Option<AggregatorFilter>,
}

impl ModelInferrer {
    pub fn new(families: FamilyTable, filter: Option<AggregatorFilter>) -> Self {
        Self { families, filter }
    }

    pub fn builtin() -> Result<Self, String> {
        Ok(Self::new(FamilyTable::builtin()?, None))
    }

    /// Infer the descriptor for one listing entry.
    ///
    /// Returns `None` when the aggregator filter excludes the model. Entries
    /// without a usable identifier yield an empty chat descriptor.
    pub fn infer(&self, listing: &ModelListing) -> Option<ModelCapabilityDescriptor> {
        if let Some(filter) = &self.filter {
            if !filter.accepts(listing) {
                return None;
            }
        }

        let Some(id) = listing.identifier() else {
            return Some(ModelCapabilityDescriptor::unknown());
        };

        let mut descriptor = self.families.classify(id);

        // Listing metadata fills whatever the family rule left unset.
        let caps = &mut descriptor.capabilities;
        if caps.context_length.is_none() {
            caps.context_length = listing.context_length;
        }
        if let Some(pricing) = &listing.pricing {
            if caps.cost_per_million_input_tokens.is_none() {
                caps.cost_per_million_input_tokens = pricing.prompt_per_million();
            }
            if caps.cost_per_million_output_tokens.is_none() {
                caps.cost_per_million_output_tokens = pricing.completion_per_million();
            }
        }

        Some(descriptor)
    }
}
