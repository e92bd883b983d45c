//! Simulated agent replies
//!
//! There is no model behind the agents. A reply is either a placeholder image
//! reference (image agents) or one of four canned sentences (text agents).
//! The HTTP chat endpoint and the client-side chat session both call into
//! this module, so the two can never drift apart.

use crate::state::{Agent, AgentType, MessageDraft, MessageSender, MessageType};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use serde_json::{json, Map, Value};

/// Base of the placeholder image URL; the query text is appended percent-encoded
pub const PLACEHOLDER_IMAGE_BASE: &str = "/placeholder.svg?height=300&width=400&query=";

/// Characters left as-is in the query: alphanumerics plus `- _ . ! ~ * ' ( )`
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Number of canned text replies
pub const TEXT_TEMPLATE_COUNT: usize = 4;

/// Content of an interactive reply
pub const INTERACTIVE_PROMPT: &str = "Here are some interactive options for you:";

/// Render the canned text reply with the given index (taken modulo the count)
pub fn text_template(index: usize, text: &str) -> String {
    match index % TEXT_TEMPLATE_COUNT {
        0 => format!("I understand you're asking about \"{}\". Let me help you with that...", text),
        1 => format!("Based on your request about \"{}\", here's what I can suggest...", text),
        2 => format!("Great question about \"{}\"! Here's my analysis...", text),
        _ => format!("I've processed your request regarding \"{}\". Here are my thoughts...", text),
    }
}

/// Every canned reply for `text`, in template order
pub fn text_templates(text: &str) -> Vec<String> {
    (0..TEXT_TEMPLATE_COUNT).map(|i| text_template(i, text)).collect()
}

/// Placeholder image location for a prompt
pub fn placeholder_image_url(text: &str) -> String {
    format!(
        "{}{}",
        PLACEHOLDER_IMAGE_BASE,
        utf8_percent_encode(text, QUERY_COMPONENT)
    )
}

/// Opening line of a chat window
pub fn greeting(agent: &Agent) -> MessageDraft {
    MessageDraft::text(
        &agent.id,
        MessageSender::Agent,
        format!(
            "Hello! I'm {}. {}. How can I help you today?",
            agent.name, agent.description
        ),
    )
}

/// Echo of the user's input as a text message
pub fn user_message(agent_id: &str, text: &str) -> MessageDraft {
    MessageDraft::text(agent_id, MessageSender::User, text)
}

/// Produce the agent's reply to `text` using the thread-local RNG
pub fn simulate_response(agent_id: &str, agent_type: AgentType, text: &str) -> MessageDraft {
    simulate_response_with(&mut rand::rng(), agent_id, agent_type, text)
}

/// Produce the agent's reply to `text`, drawing randomness from `rng`
pub fn simulate_response_with<R: Rng>(
    rng: &mut R,
    agent_id: &str,
    agent_type: AgentType,
    text: &str,
) -> MessageDraft {
    match agent_type {
        AgentType::Image => MessageDraft {
            message_type: MessageType::Image,
            image_url: Some(placeholder_image_url(text)),
            ..MessageDraft::text(
                agent_id,
                MessageSender::Agent,
                format!("Generated image based on: \"{}\"", text),
            )
        },
        AgentType::Text => {
            let index = rng.random_range(0..TEXT_TEMPLATE_COUNT);
            MessageDraft::text(agent_id, MessageSender::Agent, text_template(index, text))
        }
    }
}

fn demo_choices() -> Value {
    json!([
        {
            "id": "option1",
            "label": "Generate a landscape",
            "description": "Create a beautiful natural scene"
        },
        {
            "id": "option2",
            "label": "Generate a portrait",
            "description": "Create a character or person"
        },
        {
            "id": "option3",
            "label": "Generate abstract art",
            "description": "Create artistic patterns"
        }
    ])
}

/// Interactive choice prompt, produced when the text mentions "interactive" or "demo"
///
/// Only the local chat session offers this; the HTTP endpoint sticks to the
/// plain text and image replies.
pub fn interactive_response(agent_id: &str, text: &str) -> Option<MessageDraft> {
    let lowered = text.to_lowercase();
    if !lowered.contains("interactive") && !lowered.contains("demo") {
        return None;
    }

    let mut metadata = Map::new();
    metadata.insert("title".to_string(), json!("What would you like to do?"));
    metadata.insert("description".to_string(), json!("Choose one or more options"));
    metadata.insert("allowMultiple".to_string(), json!(true));
    metadata.insert("maxSelections".to_string(), json!(2));
    metadata.insert("choices".to_string(), demo_choices());

    Some(MessageDraft {
        message_type: MessageType::Interactive,
        metadata: Some(metadata),
        ..MessageDraft::text(agent_id, MessageSender::Agent, INTERACTIVE_PROMPT)
    })
}
