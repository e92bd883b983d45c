//! Tool API handlers

use crate::api::envelope::ApiResponse;
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::{SharedState, Tool};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request to toggle a tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateToolRequest {
    /// New enabled state (required)
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// GET /api/tools - List all tools
pub async fn list_tools(
    State(state): State<SharedState>,
) -> Result<Json<ApiResponse<Vec<Tool>>>, AppError> {
    let state = state.read().await;
    Ok(Json(ApiResponse::ok(state.tools.get_all())))
}

/// GET /api/tools/:id - Get a specific tool
pub async fn get_tool(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Tool>>, AppError> {
    let state = state.read().await;
    let tool = state
        .tools
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("Tool"))?;

    Ok(Json(ApiResponse::ok(tool)))
}

/// PUT /api/tools/:id - Enable or disable a tool
pub async fn update_tool(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateToolRequest>,
) -> Result<Json<ApiResponse<Tool>>, AppError> {
    let enabled = request.enabled.ok_or_else(|| {
        AppError::Validation("Missing required field: enabled".to_string())
    })?;

    let tool = state
        .write()
        .await
        .tools
        .update_enabled(&id, enabled)
        .ok_or_else(|| AppError::not_found("Tool"))?;
    info!(tool_id = %tool.id, enabled = tool.enabled, "Tool updated");

    Ok(Json(
        ApiResponse::ok(tool).with_message("Tool updated successfully"),
    ))
}
