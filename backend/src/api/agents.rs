//! Agent management API handlers
//!
//! Contains HTTP request handlers for agent CRUD operations.

use crate::api::envelope::ApiResponse;
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::{Agent, AgentId, AgentStatus, AgentType, AgentUpdate, NewAgent, SharedState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Create agent request
///
/// Every field is optional on the wire so that missing required fields
/// produce a 400 envelope rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    /// Name for the new agent (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Agent type (required)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    /// Initial status, defaults to active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    /// Avatar path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Persona prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Tool identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    /// Icon name, defaults to "Bot"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CreateAgentRequest {
    /// Request with the three required fields set
    pub fn new(name: impl Into<String>, description: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            agent_type: Some(agent_type),
            ..Default::default()
        }
    }

    /// Check required fields and fill in defaults
    pub fn into_new_agent(self) -> Result<NewAgent, AppError> {
        let (Some(name), Some(description), Some(agent_type)) =
            (required(self.name), required(self.description), self.agent_type)
        else {
            return Err(AppError::Validation(
                "Missing required fields: name, description, type".to_string(),
            ));
        };

        let mut agent = NewAgent::new(name, description, agent_type);
        if let Some(status) = self.status {
            agent.status = status;
        }
        if let Some(avatar) = self.avatar {
            agent.avatar = avatar;
        }
        if let Some(system_prompt) = self.system_prompt {
            agent.system_prompt = system_prompt;
        }
        if let Some(tools) = self.tools {
            agent.tools = tools;
        }
        if let Some(icon_name) = required(self.icon_name) {
            agent.icon_name = icon_name;
        }
        Ok(agent)
    }
}

/// GET /api/agents - List all agents
pub async fn list_agents(
    State(state): State<SharedState>,
) -> Result<Json<ApiResponse<Vec<Agent>>>, AppError> {
    let state = state.read().await;
    Ok(Json(ApiResponse::ok(state.agents.get_all())))
}

/// GET /api/agents/:id - Get a specific agent
pub async fn get_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
) -> Result<Json<ApiResponse<Agent>>, AppError> {
    let state = state.read().await;
    let agent = state
        .agents
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Agent"))?;

    Ok(Json(ApiResponse::ok(agent)))
}

/// POST /api/agents - Create a new agent
pub async fn create_agent(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<CreateAgentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Agent>>), AppError> {
    let new_agent = request.into_new_agent()?;

    let agent = state.write().await.agents.create(new_agent);
    info!(agent_id = %agent.id, name = %agent.name, "Agent created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(agent).with_message("Agent created successfully")),
    ))
}

/// PUT /api/agents/:id - Update an agent
pub async fn update_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
    ApiJson(request): ApiJson<AgentUpdate>,
) -> Result<Json<ApiResponse<Agent>>, AppError> {
    let agent = state
        .write()
        .await
        .agents
        .update(&id, request)
        .ok_or_else(|| AppError::not_found("Agent"))?;
    info!(agent_id = %agent.id, "Agent updated");

    Ok(Json(
        ApiResponse::ok(agent).with_message("Agent updated successfully"),
    ))
}

/// DELETE /api/agents/:id - Delete an agent
///
/// Conversations referencing the agent are left untouched.
pub async fn delete_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if !state.write().await.agents.delete(&id) {
        return Err(AppError::not_found("Agent"));
    }
    info!(agent_id = %id, "Agent deleted");

    Ok(Json(ApiResponse::confirmation("Agent deleted successfully")))
}
