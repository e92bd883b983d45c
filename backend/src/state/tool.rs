//! Tool model
//!
//! Tools are capability flags that agents reference by id. Toggling
//! `enabled` is the only mutation they support.

use crate::state::collection::{Collection, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named capability flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique identifier (e.g. "web_search")
    pub id: String,
    /// Display name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// Grouping used by the UI
    pub category: String,
    /// Whether the tool is switched on
    pub enabled: bool,
}

/// Fields for a new tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTool {
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Category
    pub category: String,
    /// Initial state
    pub enabled: bool,
}

/// Tool patch, limited to the enabled flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolUpdate {
    /// New enabled state
    pub enabled: Option<bool>,
}

impl Resource for Tool {
    type Draft = NewTool;
    type Patch = ToolUpdate;

    const ID_PREFIX: &'static str = "tool-";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewTool, _now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            enabled: draft.enabled,
        }
    }

    fn apply(&mut self, patch: ToolUpdate) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

impl Collection<Tool> {
    /// Set a tool's enabled flag
    /// Returns the updated tool, or None if the id is unknown
    pub fn update_enabled(&mut self, id: &str, enabled: bool) -> Option<Tool> {
        self.update(
            id,
            ToolUpdate {
                enabled: Some(enabled),
            },
        )
    }
}
