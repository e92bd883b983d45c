//! Agent model
//!
//! An agent is a configured chat persona: display fields, a declared type
//! (text or image), a status and the set of tool ids it may use.

use crate::state::collection::{refreshed_timestamp, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent
pub type AgentId = String;

/// Kind of output an agent produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Replies with text
    Text,
    /// Replies with a generated image
    Image,
}

/// Availability of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent is available for chat
    #[default]
    Active,
    /// Agent has not been used recently
    Idle,
}

/// Agent structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// Short description shown in the catalog
    pub description: String,
    /// Text or image agent
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    /// Current status
    pub status: AgentStatus,
    /// Avatar image path (may be empty)
    pub avatar: String,
    /// Human-readable recency label, e.g. "2 hours ago" or "Never"
    pub last_used: String,
    /// Number of conversations held with this agent
    pub conversations: u32,
    /// Prompt describing the agent's persona
    pub system_prompt: String,
    /// Tool identifiers (no duplicates, first occurrence wins)
    pub tools: Vec<String>,
    /// Name of the icon used by the UI
    pub icon_name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new agent
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Agent type
    pub agent_type: AgentType,
    /// Initial status
    pub status: AgentStatus,
    /// Avatar path
    pub avatar: String,
    /// Persona prompt
    pub system_prompt: String,
    /// Tool identifiers
    pub tools: Vec<String>,
    /// Icon name
    pub icon_name: String,
}

impl NewAgent {
    /// Icon used when the caller does not pick one
    pub const DEFAULT_ICON: &'static str = "Bot";
    /// `last_used` label of a freshly created agent
    pub const NEVER_USED: &'static str = "Never";

    /// New agent with default optional fields
    pub fn new(name: impl Into<String>, description: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            agent_type,
            status: AgentStatus::default(),
            avatar: String::new(),
            system_prompt: String::new(),
            tools: Vec::new(),
            icon_name: Self::DEFAULT_ICON.to_string(),
        }
    }
}

/// Partial agent fields merged on update
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

/// Drop repeated tool ids, keeping the first occurrence
fn dedup_tools(tools: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tools.len());
    for tool in tools {
        if !unique.contains(&tool) {
            unique.push(tool);
        }
    }
    unique
}

impl Resource for Agent {
    type Draft = NewAgent;
    type Patch = AgentUpdate;

    const ID_PREFIX: &'static str = "";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewAgent, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            agent_type: draft.agent_type,
            status: draft.status,
            avatar: draft.avatar,
            last_used: NewAgent::NEVER_USED.to_string(),
            conversations: 0,
            system_prompt: draft.system_prompt,
            tools: dedup_tools(draft.tools),
            icon_name: draft.icon_name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: AgentUpdate) {
        let AgentUpdate {
            name,
            description,
            agent_type,
            status,
            avatar,
            last_used,
            conversations,
            system_prompt,
            tools,
            icon_name,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(agent_type) = agent_type {
            self.agent_type = agent_type;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(avatar) = avatar {
            self.avatar = avatar;
        }
        if let Some(last_used) = last_used {
            self.last_used = last_used;
        }
        if let Some(conversations) = conversations {
            self.conversations = conversations;
        }
        if let Some(system_prompt) = system_prompt {
            self.system_prompt = system_prompt;
        }
        if let Some(tools) = tools {
            self.tools = dedup_tools(tools);
        }
        if let Some(icon_name) = icon_name {
            self.icon_name = icon_name;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = refreshed_timestamp(self.updated_at, now);
    }
}
