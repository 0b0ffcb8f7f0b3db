//! Agent personas handed to the agent runtime.
//!
//! Built-in personas live as TOML files under `agents/` and are embedded at
//! compile time. Users can add or replace personas in the `[agents]` table
//! of their coder config.
//!
//! # Example
//!
//! ```toml
//! name = "Interactive Code Agent"
//! description = "An interactive code assistant"
//! category = "Interactive"
//! callable = false
//!
//! [visual]
//! color = "green"
//!
//! [chat]
//! temperature = 0.2
//! top_p = 0.1
//! enabled_tools = ["@tokenring-ai/filesystem/*"]
//! system_prompt = "You are an expert developer assistant."
//!
//! [chat.context]
//! initial = [{ type = "system-message" }, { type = "current-message" }]
//! ```

pub mod definition;
pub mod registry;

pub use definition::{AgentDefinition, ChatSettings, ContextItem, VisualStyle};
pub use registry::{by_category, validate_agent, AgentRegistry};
