//! Registry of built-in agent personas.

use super::definition::AgentDefinition;
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;

/// Embed all persona TOML files at compile time.
/// To add a persona: add ONE line here and create `agents/<id>.toml`.
const AGENT_FILES: &[(&str, &str)] = &[
    ("code", include_str!("../../agents/code.toml")),
    ("team-leader", include_str!("../../agents/team-leader.toml")),
    (
        "accessibility-engineer",
        include_str!("../../agents/accessibility-engineer.toml"),
    ),
    ("api-designer", include_str!("../../agents/api-designer.toml")),
    ("auth-design", include_str!("../../agents/auth-design.toml")),
    ("backend-design", include_str!("../../agents/backend-design.toml")),
    (
        "business-logic-engineer",
        include_str!("../../agents/business-logic-engineer.toml"),
    ),
    (
        "code-quality-engineer",
        include_str!("../../agents/code-quality-engineer.toml"),
    ),
    (
        "code-symbol-locator",
        include_str!("../../agents/code-symbol-locator.toml"),
    ),
    ("data-engineer", include_str!("../../agents/data-engineer.toml")),
    (
        "database-design",
        include_str!("../../agents/database-design.toml"),
    ),
    (
        "devops-engineer",
        include_str!("../../agents/devops-engineer.toml"),
    ),
    (
        "documentation-engineer",
        include_str!("../../agents/documentation-engineer.toml"),
    ),
    (
        "frontend-design",
        include_str!("../../agents/frontend-design.toml"),
    ),
    (
        "full-stack-developer",
        include_str!("../../agents/full-stack-developer.toml"),
    ),
    (
        "integration-engineer",
        include_str!("../../agents/integration-engineer.toml"),
    ),
    (
        "performance-engineer",
        include_str!("../../agents/performance-engineer.toml"),
    ),
    (
        "product-design-engineer",
        include_str!("../../agents/product-design-engineer.toml"),
    ),
    (
        "product-manager",
        include_str!("../../agents/product-manager.toml"),
    ),
    (
        "security-review",
        include_str!("../../agents/security-review.toml"),
    ),
    ("seo-engineer", include_str!("../../agents/seo-engineer.toml")),
    (
        "system-architect",
        include_str!("../../agents/system-architect.toml"),
    ),
    ("test-engineer", include_str!("../../agents/test-engineer.toml")),
    ("ui-ux-designer", include_str!("../../agents/ui-ux-designer.toml")),
];

/// Registry of built-in agents, keyed by id.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: BTreeMap<String, AgentDefinition>,
}

impl AgentRegistry {
    /// Load all embedded agent definitions
    pub fn load() -> Result<Self> {
        let mut agents = BTreeMap::new();

        for (id, content) in AGENT_FILES {
            let agent: AgentDefinition =
                toml::from_str(content).map_err(|e| ConfigError::InvalidAgent {
                    id: id.to_string(),
                    message: e.to_string(),
                })?;
            validate_agent(id, &agent)?;
            agents.insert(id.to_string(), agent);
        }

        Ok(Self { agents })
    }

    /// Get an agent by ID
    pub fn get(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.get(id)
    }

    /// List all available agent IDs, sorted
    pub fn list_available(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    pub fn agents(&self) -> &BTreeMap<String, AgentDefinition> {
        &self.agents
    }

    /// Merge user-defined agents over the built-ins. User entries replace
    /// built-ins with the same key wholesale; other built-ins are kept.
    pub fn merged_with(
        &self,
        user: &BTreeMap<String, AgentDefinition>,
    ) -> BTreeMap<String, AgentDefinition> {
        let mut merged = self.agents.clone();
        merged.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Group agent ids by category, preserving id order within a category.
pub fn by_category(agents: &BTreeMap<String, AgentDefinition>) -> BTreeMap<&str, Vec<&str>> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (id, agent) in agents {
        groups
            .entry(agent.category.as_str())
            .or_default()
            .push(id.as_str());
    }
    groups
}

/// Validate that an agent definition is complete and usable
pub fn validate_agent(id: &str, agent: &AgentDefinition) -> Result<()> {
    let invalid = |message: String| ConfigError::InvalidAgent {
        id: id.to_string(),
        message,
    };

    if agent.name.trim().is_empty() {
        return Err(invalid("name cannot be empty".to_string()));
    }
    if agent.chat.system_prompt.trim().is_empty() {
        return Err(invalid("system prompt cannot be empty".to_string()));
    }
    if let Some(t) = agent.chat.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(invalid(format!("temperature {} outside 0..=2", t)));
        }
    }
    if let Some(p) = agent.chat.top_p {
        if !(0.0..=1.0).contains(&p) {
            return Err(invalid(format!("top_p {} outside 0..=1", p)));
        }
    }
    if agent.chat.max_steps == Some(0) {
        return Err(invalid("max_steps must be at least 1".to_string()));
    }

    Ok(())
}
