//! Capability descriptors produced for each usable model.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Chat,
    Embedding,
}

/// Capability tiers run from 1 (weakest) to 3 (strongest). Unset fields mean
/// "unknown", and the runtime applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_million_input_tokens: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_million_output_tokens: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_hot: Option<bool>,
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        *self == Capabilities::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCapabilityDescriptor {
    #[serde(rename = "type")]
    pub model_type: ModelType,
    pub capabilities: Capabilities,
}

impl ModelCapabilityDescriptor {
    /// A chat model with nothing inferred.
    pub fn unknown() -> Self {
        Self {
            model_type: ModelType::Chat,
            capabilities: Capabilities::default(),
        }
    }
}
