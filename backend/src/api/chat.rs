//! Chat API endpoint
//!
//! POST /api/agents/:id/chat echoes the user's message and returns a
//! simulated agent reply after the configured delay. When a conversation id
//! is supplied both messages are also appended to that conversation.

use crate::api::envelope::ApiResponse;
use crate::api::extract::ApiJson;
use crate::chat::simulation;
use crate::error::AppError;
use crate::state::{generate_id, AgentId, Message, SharedState, MESSAGE_ID_PREFIX};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Maximum message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Request to send a chat message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Message content (required, non-blank)
    #[serde(default)]
    pub message: Option<String>,
    /// Conversation to record the exchange in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// The user's message and the agent's reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    /// Echo of the user's message
    pub user_message: Message,
    /// Simulated reply
    pub agent_response: Message,
}

/// Validate chat message content
///
/// # Returns
/// * `Ok(&str)` - The message as sent
/// * `Err(AppError)` - Message is missing, blank or too long
pub fn validate_message(message: Option<&str>) -> Result<&str, AppError> {
    let message = message.unwrap_or_default();
    if message.trim().is_empty() {
        return Err(AppError::Validation(
            "Message content is required".to_string(),
        ));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::Validation(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(message)
}

/// POST /api/agents/:id/chat - Send a message to an agent
pub async fn send_message(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ApiResponse<ChatExchange>>, AppError> {
    let text = validate_message(request.message.as_deref())?.to_string();

    // Look everything up first; the lock must not be held across the delay.
    let (agent_type, delay) = {
        let state = state.read().await;
        let agent = state
            .agents
            .get_by_id(&id)
            .ok_or_else(|| AppError::not_found("Agent"))?;
        if let Some(conversation_id) = &request.conversation_id {
            if state.conversations.get_by_id(conversation_id).is_none() {
                return Err(AppError::not_found("Conversation"));
            }
        }
        (agent.agent_type, state.chat_delay)
    };

    let user_draft = simulation::user_message(&id, &text);

    debug!(agent_id = %id, delay_ms = delay.as_millis(), "Simulating agent response");
    tokio::time::sleep(delay).await;

    let reply_draft = simulation::simulate_response(&id, agent_type, &text);

    let exchange = match request.conversation_id.as_deref() {
        Some(conversation_id) => {
            let mut state = state.write().await;
            // The conversation may have been deleted while we were waiting.
            let user_message = state
                .conversations
                .add_message(conversation_id, user_draft)
                .ok_or_else(|| AppError::not_found("Conversation"))?;
            let agent_response = state
                .conversations
                .add_message(conversation_id, reply_draft)
                .ok_or_else(|| AppError::not_found("Conversation"))?;
            ChatExchange {
                user_message,
                agent_response,
            }
        }
        None => ChatExchange {
            user_message: user_draft.into_message(generate_id(MESSAGE_ID_PREFIX)),
            agent_response: reply_draft.into_message(generate_id(MESSAGE_ID_PREFIX)),
        },
    };

    info!(
        agent_id = %id,
        conversation_id = ?request.conversation_id,
        response_type = ?exchange.agent_response.message_type,
        "Chat message processed"
    );

    Ok(Json(ApiResponse::ok(exchange)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::simulation::text_templates;
    use crate::state::{AppState, MessageSender, MessageType};
    use std::time::Duration;

    fn create_test_state() -> SharedState {
        AppState::with_demo_data()
            .with_chat_delay(Duration::ZERO)
            .shared()
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: Some(message.to_string()),
            conversation_id: None,
        }
    }

    #[test]
    fn test_validate_message() {
        assert!(validate_message(None).is_err());
        assert!(validate_message(Some("")).is_err());
        assert!(validate_message(Some("   ")).is_err());
        assert!(validate_message(Some(&"a".repeat(MAX_MESSAGE_LENGTH + 1))).is_err());
        assert_eq!(validate_message(Some(" hi ")).unwrap(), " hi ");
    }

    #[tokio::test]
    async fn test_text_agent_reply() {
        let state = create_test_state();
        let response = send_message(State(state), Path("1".to_string()), ApiJson(request("hello")))
            .await
            .unwrap();

        let exchange = response.0.data.unwrap();
        assert_eq!(exchange.user_message.content, "hello");
        assert_eq!(exchange.user_message.sender, MessageSender::User);
        assert_eq!(exchange.agent_response.sender, MessageSender::Agent);
        assert!(text_templates("hello").contains(&exchange.agent_response.content));
        assert_ne!(exchange.user_message.id, exchange.agent_response.id);
    }

    #[tokio::test]
    async fn test_image_agent_reply() {
        let state = create_test_state();
        let response = send_message(
            State(state),
            Path("2".to_string()),
            ApiJson(request("sunset over lake")),
        )
        .await
        .unwrap();

        let reply = response.0.data.unwrap().agent_response;
        assert_eq!(reply.message_type, MessageType::Image);
        assert!(reply
            .image_url
            .unwrap()
            .ends_with("query=sunset%20over%20lake"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected_before_agent_lookup() {
        let state = create_test_state();
        let result = send_message(State(state), Path("missing".to_string()), ApiJson(request(""))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_agent() {
        let state = create_test_state();
        let result =
            send_message(State(state), Path("missing".to_string()), ApiJson(request("hi"))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_exchange_recorded_in_conversation() {
        let state = create_test_state();
        let chat = ChatRequest {
            message: Some("more please".to_string()),
            conversation_id: Some("conv-1".to_string()),
        };

        let exchange = send_message(State(state.clone()), Path("1".to_string()), ApiJson(chat))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        let state = state.read().await;
        let conversation = state.conversations.get_by_id("conv-1").unwrap();
        assert_eq!(conversation.messages.len(), 4);
        assert_eq!(conversation.messages[2], exchange.user_message);
        assert_eq!(conversation.messages[3], exchange.agent_response);
    }

    #[tokio::test]
    async fn test_unknown_conversation() {
        let state = create_test_state();
        let chat = ChatRequest {
            message: Some("hi".to_string()),
            conversation_id: Some("conv-missing".to_string()),
        };
        let result = send_message(State(state), Path("1".to_string()), ApiJson(chat)).await;
        assert!(matches!(result, Err(AppError::NotFound(message)) if message == "Conversation not found"));
    }
}
