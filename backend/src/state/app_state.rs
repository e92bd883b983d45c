// Application state management
// Owns the resource collections shared by every request handler

use crate::config::Config;
use crate::state::agent::Agent;
use crate::state::collection::Collection;
use crate::state::conversation::Conversation;
use crate::state::seed;
use crate::state::tool::Tool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Default simulated latency of the chat endpoint
pub const DEFAULT_CHAT_DELAY: Duration = Duration::from_millis(1000);

/// State handle passed to every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Main application state
///
/// Constructed once per process and injected into the router; nothing in
/// the crate keeps global mutable state. Every mutation happens under the
/// write half of the lock, so concurrent writers to the same id resolve as
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Agent catalog
    pub agents: Collection<Agent>,
    /// Conversation transcripts
    pub conversations: Collection<Conversation>,
    /// Tool flags
    pub tools: Collection<Tool>,
    /// Simulated processing time of a chat reply
    pub chat_delay: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            agents: Collection::new(),
            conversations: Collection::new(),
            tools: Collection::new(),
            chat_delay: DEFAULT_CHAT_DELAY,
        }
    }
}

impl AppState {
    /// Create an empty application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state pre-loaded with the demo catalog
    pub fn with_demo_data() -> Self {
        Self {
            agents: Collection::from_items(seed::demo_agents()),
            conversations: Collection::from_items(seed::demo_conversations()),
            tools: Collection::from_items(seed::demo_tools()),
            ..Self::default()
        }
    }

    /// Build the state described by the configuration
    pub fn from_config(config: &Config) -> Self {
        let state = if config.store.seed_demo_data {
            Self::with_demo_data()
        } else {
            Self::new()
        };
        state.with_chat_delay(config.chat.delay())
    }

    /// Override the simulated chat delay
    pub fn with_chat_delay(mut self, delay: Duration) -> Self {
        self.chat_delay = delay;
        self
    }

    /// Wrap the state for sharing between handlers
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.agents.is_empty());
        assert!(state.conversations.is_empty());
        assert!(state.tools.is_empty());
        assert_eq!(state.chat_delay, DEFAULT_CHAT_DELAY);
    }

    #[test]
    fn test_demo_data_loaded() {
        let state = AppState::with_demo_data();
        assert_eq!(state.agents.len(), 4);
        assert_eq!(state.tools.len(), 10);
        assert_eq!(state.conversations.get_by_agent_id("1").len(), 1);
    }

    #[test]
    fn test_from_config_respects_seed_flag() {
        let mut config = Config::default();
        config.store.seed_demo_data = false;
        config.chat.delay_ms = 5;

        let state = AppState::from_config(&config);
        assert!(state.agents.is_empty());
        assert_eq!(state.chat_delay, Duration::from_millis(5));
    }

    #[test]
    fn test_states_are_isolated() {
        let mut first = AppState::with_demo_data();
        let second = AppState::with_demo_data();

        assert!(first.agents.delete("1"));
        assert!(second.agents.get_by_id("1").is_some());
    }
}
