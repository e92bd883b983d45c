// State management module
// Resource store: entity models, in-memory collections and application state

pub mod agent;
pub mod app_state;
pub mod collection;
pub mod conversation;
pub mod seed;
pub mod tool;

pub use agent::{Agent, AgentId, AgentStatus, AgentType, AgentUpdate, NewAgent};
pub use app_state::{AppState, SharedState};
pub use collection::{generate_id, Collection, Resource};
pub use conversation::{
    Conversation, ConversationUpdate, Message, MessageDraft, MessageSender, MessageType,
    NewConversation, MESSAGE_ID_PREFIX,
};
pub use tool::{NewTool, Tool, ToolUpdate};
