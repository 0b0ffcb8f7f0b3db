//! Model capability inference.
//!
//! Providers return model lists in several shapes. Each entry is reduced to a
//! [`ModelListing`], its identifier is normalized, and a [`FamilyTable`]
//! maps it to a [`ModelCapabilityDescriptor`]. Aggregator providers
//! additionally run an [`AggregatorFilter`] that drops models without tool
//! calling or already reachable through their native provider.
//!
//! Inference never fails: malformed or unrecognized entries degrade to an
//! empty capability set.

pub mod capability;
pub mod listing;
pub mod rules;

pub use capability::{Capabilities, ModelCapabilityDescriptor, ModelType};
pub use listing::{listing_entries, ModelListing};
pub use rules::{
    normalize_model_id, AggregatorFilter, AggregatorFilterConfig, FamilyRule, FamilyTable,
    ModelInferrer,
};
