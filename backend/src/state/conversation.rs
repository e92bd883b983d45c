//! Conversation and message models
//!
//! A conversation is an ordered transcript of messages tied to one agent.
//! Messages are only ever appended; the store never removes them.

use crate::state::collection::{generate_id, refreshed_timestamp, Collection, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix of generated message ids
pub const MESSAGE_ID_PREFIX: &str = "msg-";

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    /// Message typed by the user
    User,
    /// Message produced by the agent
    Agent,
}

/// Presentation kind of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text
    #[default]
    Text,
    /// Image reference in `image_url`
    Image,
    /// Interactive choices carried in `metadata`
    Interactive,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier, assigned by the store when missing
    #[serde(default)]
    pub id: String,
    /// Agent the message belongs to
    #[serde(default)]
    pub agent_id: String,
    /// Message text
    pub content: String,
    /// Sender of the message
    pub sender: MessageSender,
    /// When the message was produced
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Kind of message
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    /// Image location for image messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Free-form extra data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Message fields before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    /// Agent the message belongs to
    pub agent_id: String,
    /// Message text
    pub content: String,
    /// Sender
    pub sender: MessageSender,
    /// When the message was produced
    pub timestamp: DateTime<Utc>,
    /// Kind of message
    pub message_type: MessageType,
    /// Image location for image messages
    pub image_url: Option<String>,
    /// Free-form extra data
    pub metadata: Option<Map<String, Value>>,
}

impl MessageDraft {
    /// Plain text message stamped with the current time
    pub fn text(agent_id: impl Into<String>, sender: MessageSender, content: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            message_type: MessageType::Text,
            image_url: None,
            metadata: None,
        }
    }

    /// Attach an id, producing a complete message
    pub fn into_message(self, id: String) -> Message {
        Message {
            id,
            agent_id: self.agent_id,
            content: self.content,
            sender: self.sender,
            timestamp: self.timestamp,
            message_type: self.message_type,
            image_url: self.image_url,
            metadata: self.metadata,
        }
    }
}

/// A conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique identifier
    pub id: String,
    /// Owning agent (not checked against the agent collection)
    pub agent_id: String,
    /// Title shown in the history panel
    pub title: String,
    /// Messages in append order
    pub messages: Vec<Message>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new conversation
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversation {
    /// Owning agent
    pub agent_id: String,
    /// Title
    pub title: String,
    /// Initial transcript
    pub messages: Vec<Message>,
}

/// Partial conversation fields merged on update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationUpdate {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Resource for Conversation {
    type Draft = NewConversation;
    type Patch = ConversationUpdate;

    const ID_PREFIX: &'static str = "conv-";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewConversation, now: DateTime<Utc>) -> Self {
        let agent_id = draft.agent_id;
        let messages = draft
            .messages
            .into_iter()
            .map(|mut message| {
                message.id = generate_id(MESSAGE_ID_PREFIX);
                if message.agent_id.is_empty() {
                    message.agent_id = agent_id.clone();
                }
                message
            })
            .collect();

        Self {
            id,
            agent_id,
            title: draft.title,
            messages,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ConversationUpdate) {
        if let Some(title) = patch.title {
            self.title = title;
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = refreshed_timestamp(self.updated_at, now);
    }
}

impl Collection<Conversation> {
    /// All conversations owned by `agent_id`, in insertion order
    pub fn get_by_agent_id(&self, agent_id: &str) -> Vec<Conversation> {
        self.iter()
            .filter(|conversation| conversation.agent_id == agent_id)
            .cloned()
            .collect()
    }

    /// Append a message to a conversation
    ///
    /// Assigns a fresh message id and bumps the conversation's `updated_at`.
    /// Returns the stored message, or None if the conversation is unknown.
    pub fn add_message(&mut self, conversation_id: &str, draft: MessageDraft) -> Option<Message> {
        let conversation = self.get_mut(conversation_id)?;
        let message = draft.into_message(generate_id(MESSAGE_ID_PREFIX));
        conversation.messages.push(message.clone());
        conversation.touch(Utc::now());
        tracing::debug!(
            conversation_id = %conversation_id,
            message_id = %message.id,
            "Message appended"
        );
        Some(message)
    }
}
