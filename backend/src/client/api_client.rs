//! Agent hub API client
//!
//! Thin typed wrapper over the REST endpoints. Every call parses the response
//! envelope; an envelope with `success: false` becomes [`ClientError::Api`].
//! There is no retry: a failed request is returned to the caller as is.

use crate::api::agents::CreateAgentRequest;
use crate::api::chat::{ChatExchange, ChatRequest};
use crate::api::conversations::CreateConversationRequest;
use crate::api::envelope::ApiResponse;
use crate::api::tools::UpdateToolRequest;
use crate::client::error::ClientError;
use crate::state::{Agent, AgentUpdate, Conversation, Tool};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

/// Client for the agent hub REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url` (e.g. "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Server base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    error: format!("API request failed: {}", status),
                })
            }
            Err(e) => return Err(ClientError::Decode(e)),
        };

        if !envelope.success || !status.is_success() {
            let error = envelope
                .error
                .unwrap_or_else(|| format!("API request failed: {}", status));
            tracing::debug!(status = %status.as_u16(), error = %error, "API call failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                error,
            });
        }

        Ok(envelope)
    }

    async fn data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        self.request(builder).await?.data.ok_or(ClientError::MissingData)
    }

    /// GET /api/agents
    pub async fn get_agents(&self) -> Result<Vec<Agent>, ClientError> {
        self.data(self.endpoint(Method::GET, "/agents")).await
    }

    /// GET /api/agents/:id
    pub async fn get_agent(&self, id: &str) -> Result<Agent, ClientError> {
        self.data(self.endpoint(Method::GET, &format!("/agents/{}", id)))
            .await
    }

    /// POST /api/agents
    pub async fn create_agent(&self, agent: &CreateAgentRequest) -> Result<Agent, ClientError> {
        let builder = self.endpoint(Method::POST, "/agents").json(agent);
        self.data(builder).await
    }

    /// PUT /api/agents/:id
    pub async fn update_agent(&self, id: &str, updates: &AgentUpdate) -> Result<Agent, ClientError> {
        let builder = self.endpoint(Method::PUT, &format!("/agents/{}", id)).json(updates);
        self.data(builder).await
    }

    /// DELETE /api/agents/:id
    pub async fn delete_agent(&self, id: &str) -> Result<(), ClientError> {
        self.request::<serde_json::Value>(self.endpoint(Method::DELETE, &format!("/agents/{}", id)))
            .await
            .map(|_| ())
    }

    /// POST /api/agents/:id/chat
    pub async fn send_message(
        &self,
        agent_id: &str,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatExchange, ClientError> {
        let body = ChatRequest {
            message: Some(message.to_string()),
            conversation_id: conversation_id.map(str::to_string),
        };
        let builder = self.endpoint(Method::POST, &format!("/agents/{}/chat", agent_id)).json(&body);
        self.data(builder).await
    }

    /// GET /api/conversations, optionally filtered by agent
    pub async fn get_conversations(
        &self,
        agent_id: Option<&str>,
    ) -> Result<Vec<Conversation>, ClientError> {
        let mut builder = self.endpoint(Method::GET, "/conversations");
        if let Some(agent_id) = agent_id {
            builder = builder.query(&[("agentId", agent_id)]);
        }
        self.data(builder).await
    }

    /// POST /api/conversations
    pub async fn create_conversation(
        &self,
        conversation: &CreateConversationRequest,
    ) -> Result<Conversation, ClientError> {
        let builder = self.endpoint(Method::POST, "/conversations").json(conversation);
        self.data(builder).await
    }

    /// GET /api/tools
    pub async fn get_tools(&self) -> Result<Vec<Tool>, ClientError> {
        self.data(self.endpoint(Method::GET, "/tools")).await
    }

    /// PUT /api/tools/:id
    pub async fn update_tool(&self, id: &str, enabled: bool) -> Result<Tool, ClientError> {
        let body = UpdateToolRequest {
            enabled: Some(enabled),
        };
        let builder = self.endpoint(Method::PUT, &format!("/tools/{}", id)).json(&body);
        self.data(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgentType;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    const AGENT_JSON: &str = r#"{
        "id": "1",
        "name": "Code Assistant",
        "description": "Helps with programming tasks and code review",
        "type": "text",
        "status": "active",
        "avatar": "/robot-coding.jpg",
        "lastUsed": "2 hours ago",
        "conversations": 24,
        "systemPrompt": "You are a helpful coding assistant.",
        "tools": ["code_execution"],
        "iconName": "Code",
        "createdAt": "2024-01-15T00:00:00Z",
        "updatedAt": "2024-01-20T00:00:00Z"
    }"#;

    #[tokio::test]
    #[serial]
    async fn test_get_agents_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/agents")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"success":true,"data":[{}]}}"#, AGENT_JSON))
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let agents = client.get_agents().await;

        mock.assert_async().await;
        let agents = agents.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].agent_type, AgentType::Text);
        assert_eq!(agents[0].icon_name, "Code");
    }

    #[tokio::test]
    #[serial]
    async fn test_not_found_maps_to_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/agents/999")
            .with_status(404)
            .with_body(r#"{"success":false,"error":"Agent not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(format!("{}/", server.url()));
        let result = client.get_agent("999").await;

        mock.assert_async().await;
        match result {
            Err(ClientError::Api { status, error }) => {
                assert_eq!(status, 404);
                assert_eq!(error, "Agent not found");
            }
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_create_agent_sends_camel_case_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/agents")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Code Assistant",
                "type": "text",
                "iconName": "Code"
            })))
            .with_status(201)
            .with_body(format!(
                r#"{{"success":true,"data":{},"message":"Agent created successfully"}}"#,
                AGENT_JSON
            ))
            .create_async()
            .await;

        let mut request = CreateAgentRequest::new(
            "Code Assistant",
            "Helps with programming tasks and code review",
            AgentType::Text,
        );
        request.icon_name = Some("Code".to_string());

        let client = ApiClient::new(server.url());
        let agent = client.create_agent(&request).await;

        mock.assert_async().await;
        assert_eq!(agent.unwrap().id, "1");
    }

    #[tokio::test]
    #[serial]
    async fn test_conversations_query_parameter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/conversations")
            .match_query(Matcher::UrlEncoded("agentId".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"success":true,"data":[]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let conversations = client.get_conversations(Some("1")).await;

        mock.assert_async().await;
        assert!(conversations.unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_without_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/agents/1")
            .with_status(200)
            .with_body(r#"{"success":true,"message":"Agent deleted successfully"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let result = client.delete_agent("1").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_non_json_error_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tools")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let result = client.get_tools().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ClientError::Api { status: 502, .. })));
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_json_on_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tools")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let result = client.get_tools().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_success_without_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/tools/web_search")
            .match_body(Matcher::Json(serde_json::json!({"enabled": false})))
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url());
        let result = client.update_tool("web_search", false).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ClientError::MissingData)));
    }
}
