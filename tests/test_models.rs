use serde_json::json;
use tr_coder::models::{
    listing_entries, normalize_model_id, AggregatorFilter, AggregatorFilterConfig, FamilyTable,
    ModelInferrer, ModelListing, ModelType,
};

fn aggregator() -> ModelInferrer {
    let filter = AggregatorFilter::compile(&AggregatorFilterConfig::default()).unwrap();
    ModelInferrer::new(FamilyTable::builtin().unwrap(), Some(filter))
}

#[test]
fn test_hf_id_matches_qwen_family() {
    let id = "hf.co/myorg/qwen3-7b:latest";
    assert_eq!(normalize_model_id(id), "qwen3-7b");

    let table = FamilyTable::builtin().unwrap();
    assert_eq!(table.family_of(id), Some("qwen"));

    let descriptor = table.classify(id);
    assert_eq!(descriptor.model_type, ModelType::Chat);
    assert_eq!(descriptor.capabilities.context_length, Some(128_000));
}

#[test]
fn test_embed_anywhere_is_embedding() {
    let table = FamilyTable::builtin().unwrap();
    for id in [
        "nomic-embed-text:latest",
        "text-EMBEDDING-3-large",
        "hf.co/org/Qwen3-Embed-0.6B",
        "mxbai-embed-large",
    ] {
        let descriptor = table.classify(id);
        assert_eq!(descriptor.model_type, ModelType::Embedding, "{}", id);
        assert_eq!(descriptor.capabilities.always_hot, Some(true), "{}", id);
    }
}

#[test]
fn test_llama4_variants() {
    let table = FamilyTable::builtin().unwrap();

    let scout = table.classify("llama-4-scout-17b");
    let maverick = table.classify("llama-4-maverick-17b");
    assert_eq!(scout.capabilities.context_length, Some(10_000_000));
    assert!(maverick.capabilities.intelligence > scout.capabilities.intelligence);
}

#[test]
fn test_aggregator_requires_tools_even_for_known_family() {
    let listing = ModelListing::from_value(&json!({
        "id": "qwen/qwen3-235b-a22b",
        "supported_parameters": ["temperature", "top_p"]
    }));

    assert_eq!(aggregator().infer(&listing), None);

    // The same listing is fine for a native provider
    let native = ModelInferrer::builtin().unwrap();
    assert!(native.infer(&listing).is_some());
}

#[test]
fn test_aggregator_blocklist() {
    let inferrer = aggregator();
    for id in ["openai/gpt-4.1", "anthropic/claude-sonnet-4", "x-ai/grok-4", "perplexity/sonar"] {
        let listing = ModelListing::from_value(&json!({
            "id": id,
            "supported_parameters": ["tools"]
        }));
        let expected_excluded = id != "x-ai/grok-4";
        assert_eq!(inferrer.infer(&listing).is_none(), expected_excluded, "{}", id);
    }
}

#[test]
fn test_custom_blocklist() {
    let filter = AggregatorFilter::compile(&AggregatorFilterConfig {
        require_tools: false,
        exclude: "mistralai".to_string(),
    })
    .unwrap();
    let inferrer = ModelInferrer::new(FamilyTable::builtin().unwrap(), Some(filter));

    let blocked = ModelListing::from_value(&json!({"id": "mistralai/mistral-large"}));
    let kept = ModelListing::from_value(&json!({"id": "openai/gpt-4.1"}));
    assert!(inferrer.infer(&blocked).is_none());
    assert!(inferrer.infer(&kept).is_some());
}

#[test]
fn test_ollama_listing_document() {
    let document = json!({"models": [
        {"name": "qwen2.5-coder:latest", "model": "qwen2.5-coder:latest", "details": {"family": "qwen2"}},
        {"name": "nomic-embed-text:latest", "model": "nomic-embed-text:latest"},
        {"name": "phi4:latest", "model": "phi4:latest"}
    ]});

    let inferrer = ModelInferrer::builtin().unwrap();
    let descriptors: Vec<_> = listing_entries(&document)
        .iter()
        .map(|l| inferrer.infer(l).unwrap())
        .collect();

    assert_eq!(descriptors[0].capabilities.reasoning, Some(2));
    assert_eq!(descriptors[1].model_type, ModelType::Embedding);
    assert!(descriptors[2].capabilities.is_empty());
}

#[test]
fn test_malformed_entries_never_error() {
    let document = json!({"data": [null, 7, {"id": ["not", "a", "string"]}, {}]});
    let inferrer = aggregator();
    for listing in listing_entries(&document) {
        assert_eq!(inferrer.infer(&listing), None);
    }

    let native = ModelInferrer::builtin().unwrap();
    for listing in listing_entries(&document) {
        assert!(native.infer(&listing).unwrap().capabilities.is_empty());
    }
}
