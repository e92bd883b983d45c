//! Conversation API handlers
//!
//! Listing, creation and maintenance of conversation transcripts.

use crate::api::envelope::ApiResponse;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::error::AppError;
use crate::state::{
    Conversation, ConversationUpdate, Message, MessageDraft, MessageSender, MessageType,
    NewConversation, SharedState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Query parameters of GET /api/conversations
#[derive(Debug, Default, Deserialize)]
pub struct ConversationQuery {
    /// Only return conversations owned by this agent
    #[serde(rename = "agentId")]
    pub agent_id: Option<String>,
}

/// Request to create a conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    /// Owning agent (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Title (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Initial transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

impl CreateConversationRequest {
    /// Request for an empty conversation
    pub fn new(agent_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            agent_id: Some(agent_id.into()),
            title: Some(title.into()),
            messages: None,
        }
    }
}

/// Request to append a message to a conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessageRequest {
    /// Message text (required)
    #[serde(default)]
    pub content: Option<String>,
    /// Sender (required)
    #[serde(default)]
    pub sender: Option<MessageSender>,
    /// Message kind, defaults to text
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,
    /// Agent id, defaults to the conversation's agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Extra data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// GET /api/conversations?agentId= - List conversations
pub async fn list_conversations(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<ConversationQuery>,
) -> Result<Json<ApiResponse<Vec<Conversation>>>, AppError> {
    let state = state.read().await;
    let conversations = match query.agent_id.as_deref().filter(|id| !id.is_empty()) {
        Some(agent_id) => state.conversations.get_by_agent_id(agent_id),
        None => state.conversations.get_all(),
    };

    Ok(Json(ApiResponse::ok(conversations)))
}

/// POST /api/conversations - Create a conversation
///
/// The agent id is stored as given; it is not checked against the agent list.
pub async fn create_conversation(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Conversation>>), AppError> {
    let agent_id = request.agent_id.filter(|v| !v.is_empty());
    let title = request.title.filter(|v| !v.is_empty());
    let (Some(agent_id), Some(title)) = (agent_id, title) else {
        return Err(AppError::Validation(
            "Missing required fields: agentId, title".to_string(),
        ));
    };

    let conversation = state.write().await.conversations.create(NewConversation {
        agent_id,
        title,
        messages: request.messages.unwrap_or_default(),
    });
    info!(
        conversation_id = %conversation.id,
        agent_id = %conversation.agent_id,
        "Conversation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(conversation).with_message("Conversation created successfully")),
    ))
}

/// GET /api/conversations/:id - Get one conversation with its messages
pub async fn get_conversation(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let state = state.read().await;
    let conversation = state
        .conversations
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Conversation"))?;

    Ok(Json(ApiResponse::ok(conversation)))
}

/// PUT /api/conversations/:id - Update conversation title
pub async fn update_conversation(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ConversationUpdate>,
) -> Result<Json<ApiResponse<Conversation>>, AppError> {
    let conversation = state
        .write()
        .await
        .conversations
        .update(&id, request)
        .ok_or_else(|| AppError::not_found("Conversation"))?;

    Ok(Json(
        ApiResponse::ok(conversation).with_message("Conversation updated successfully"),
    ))
}

/// DELETE /api/conversations/:id - Delete a conversation
pub async fn delete_conversation(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if !state.write().await.conversations.delete(&id) {
        return Err(AppError::not_found("Conversation"));
    }
    info!(conversation_id = %id, "Conversation deleted");

    Ok(Json(ApiResponse::confirmation(
        "Conversation deleted successfully",
    )))
}

/// POST /api/conversations/:id/messages - Append a message
pub async fn add_message(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<AddMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), AppError> {
    let (Some(content), Some(sender)) = (request.content.filter(|c| !c.is_empty()), request.sender)
    else {
        return Err(AppError::Validation(
            "Missing required fields: content, sender".to_string(),
        ));
    };

    let mut state = state.write().await;
    let owner = state
        .conversations
        .get_by_id(&id)
        .map(|conversation| conversation.agent_id.clone())
        .ok_or_else(|| AppError::not_found("Conversation"))?;

    let draft = MessageDraft {
        agent_id: request.agent_id.unwrap_or(owner),
        content,
        sender,
        timestamp: Utc::now(),
        message_type: request.message_type.unwrap_or_default(),
        image_url: request.image_url,
        metadata: request.metadata,
    };
    let message = state
        .conversations
        .add_message(&id, draft)
        .ok_or_else(|| AppError::not_found("Conversation"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(message).with_message("Message added successfully")),
    ))
}
