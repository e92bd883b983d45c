//! Client-side chat session
//!
//! Holds the transcript shown in a chat window. Replies either come from the
//! server (`Remote`) or are produced locally with the same simulation the
//! server uses (`Local`), which also offers the interactive choice prompt.

use crate::chat::simulation;
use crate::client::api_client::ApiClient;
use crate::client::error::ClientError;
use crate::state::{generate_id, Agent, AgentType, Message, MessageSender, MESSAGE_ID_PREFIX};
use std::time::Duration;

/// Default local "thinking" time before a simulated reply
pub const DEFAULT_LOCAL_DELAY: Duration = Duration::from_millis(1500);

/// Where replies come from
#[derive(Debug, Clone)]
pub enum ChatBackend {
    /// Ask the server's chat endpoint
    Remote(ApiClient),
    /// Simulate in-process
    Local {
        /// Delay before each reply
        delay: Duration,
    },
}

/// Transcript and request state of one chat window
#[derive(Debug, Clone)]
pub struct ChatSession {
    agent_id: String,
    backend: ChatBackend,
    mode: AgentType,
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
}

impl ChatSession {
    /// Session whose replies come from the server
    ///
    /// The server answers according to the agent's stored type, so the reply
    /// mode only affects local sessions.
    pub fn remote(client: ApiClient, agent_id: impl Into<String>) -> Self {
        Self::new(agent_id, ChatBackend::Remote(client), AgentType::Text)
    }

    /// Session simulating replies locally, starting in `agent_type` mode
    pub fn local(agent_id: impl Into<String>, agent_type: AgentType) -> Self {
        Self::new(
            agent_id,
            ChatBackend::Local {
                delay: DEFAULT_LOCAL_DELAY,
            },
            agent_type,
        )
    }

    /// Local session for `agent`, opened with the agent's greeting
    pub fn for_agent(agent: &Agent) -> Self {
        Self::local(agent.id.clone(), agent.agent_type).with_greeting(agent)
    }

    fn new(agent_id: impl Into<String>, backend: ChatBackend, mode: AgentType) -> Self {
        Self {
            agent_id: agent_id.into(),
            backend,
            mode,
            messages: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Override the local reply delay (no effect on remote sessions)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        if let ChatBackend::Local { delay: current } = &mut self.backend {
            *current = delay;
        }
        self
    }

    /// Open the transcript with the agent introducing itself
    pub fn with_greeting(mut self, agent: &Agent) -> Self {
        self.messages
            .push(simulation::greeting(agent).into_message(generate_id(MESSAGE_ID_PREFIX)));
        self
    }

    /// Current reply mode
    pub fn mode(&self) -> AgentType {
        self.mode
    }

    /// Switch between text and image replies, whatever the agent's declared type
    pub fn set_mode(&mut self, mode: AgentType) {
        self.mode = mode;
    }

    /// Messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a reply is being awaited
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error of the last failed request, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send `content` and append the user's message plus the reply
    ///
    /// Blank input is ignored. On failure the transcript is left unchanged and
    /// the error is recorded; nothing is retried.
    pub async fn send_message(&mut self, content: &str) -> Result<(), ClientError> {
        if content.trim().is_empty() {
            return Ok(());
        }

        self.begin();
        let result = match &self.backend {
            ChatBackend::Remote(client) => client
                .send_message(&self.agent_id, content, None)
                .await
                .map(|exchange| vec![exchange.user_message, exchange.agent_response]),
            ChatBackend::Local { delay } => {
                let user = simulation::user_message(&self.agent_id, content)
                    .into_message(generate_id(MESSAGE_ID_PREFIX));
                let reply = local_reply(&self.agent_id, self.mode, *delay, content).await;
                Ok(vec![user, reply])
            }
        };

        let messages = self.finish(result)?;
        self.messages.extend(messages);
        Ok(())
    }

    /// Rewrite a user message, drop everything after it and regenerate the reply
    ///
    /// The transcript is only touched once the new reply has arrived.
    pub async fn edit_message(&mut self, message_id: &str, content: &str) -> Result<(), ClientError> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == message_id && m.sender == MessageSender::User)
            .ok_or_else(|| ClientError::UnknownMessage(message_id.to_string()))?;

        self.begin();
        let result = match &self.backend {
            ChatBackend::Remote(client) => client
                .send_message(&self.agent_id, content, None)
                .await
                .map(|exchange| exchange.agent_response),
            ChatBackend::Local { delay } => {
                Ok(local_reply(&self.agent_id, self.mode, *delay, content).await)
            }
        };

        let reply = self.finish(result)?;
        self.messages.truncate(index + 1);
        if let Some(edited) = self.messages.get_mut(index) {
            edited.content = content.to_string();
        }
        self.messages.push(reply);
        Ok(())
    }

    /// Record the option picked from an interactive reply as a user message
    pub fn select_choice(&mut self, choice: &str) -> Message {
        let message = simulation::user_message(&self.agent_id, &format!("You selected: {}", choice))
            .into_message(generate_id(MESSAGE_ID_PREFIX));
        self.messages.push(message.clone());
        message
    }

    /// Forget the transcript and any error
    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        self.loading = false;
        result.map_err(|e| {
            tracing::warn!(agent_id = %self.agent_id, error = %e, "Chat request failed");
            self.error = Some(e.to_string());
            e
        })
    }
}

async fn local_reply(agent_id: &str, mode: AgentType, delay: Duration, text: &str) -> Message {
    tokio::time::sleep(delay).await;
    let draft = match mode {
        AgentType::Text => simulation::interactive_response(agent_id, text)
            .unwrap_or_else(|| simulation::simulate_response(agent_id, mode, text)),
        AgentType::Image => simulation::simulate_response(agent_id, mode, text),
    };
    draft.into_message(generate_id(MESSAGE_ID_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::simulation::{text_templates, INTERACTIVE_PROMPT};
    use crate::state::{Collection, MessageDraft, MessageType, NewAgent};
    use mockito::Server;
    use serial_test::serial;

    fn local_session(agent_type: AgentType) -> ChatSession {
        ChatSession::local("1", agent_type).with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_local_text_exchange() {
        let mut session = local_session(AgentType::Text);
        session.send_message("hello").await.unwrap();

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, MessageSender::User);
        assert_eq!(messages[0].content, "hello");
        assert!(text_templates("hello").contains(&messages[1].content));
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_local_image_exchange() {
        let mut session = local_session(AgentType::Image);
        session.send_message("a demo castle").await.unwrap();

        let reply = &session.messages()[1];
        assert_eq!(reply.message_type, MessageType::Image);
        assert!(reply.image_url.as_deref().unwrap().contains("a%20demo%20castle"));
    }

    #[tokio::test]
    async fn test_local_interactive_trigger() {
        let mut session = local_session(AgentType::Text);
        session.send_message("show me something interactive").await.unwrap();

        let reply = &session.messages()[1];
        assert_eq!(reply.message_type, MessageType::Interactive);
        assert_eq!(reply.content, INTERACTIVE_PROMPT);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut session = local_session(AgentType::Text);
        session.send_message("   ").await.unwrap();
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_edit_regenerates_reply() {
        let mut session = local_session(AgentType::Text);
        session.send_message("first").await.unwrap();
        session.send_message("second").await.unwrap();
        let first_id = session.messages()[0].id.clone();

        session.edit_message(&first_id, "rewritten").await.unwrap();

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, first_id);
        assert_eq!(messages[0].content, "rewritten");
        assert!(text_templates("rewritten").contains(&messages[1].content));
    }

    #[tokio::test]
    async fn test_edit_unknown_message() {
        let mut session = local_session(AgentType::Text);
        session.send_message("first").await.unwrap();
        let agent_reply_id = session.messages()[1].id.clone();

        let result = session.edit_message(&agent_reply_id, "nope").await;
        assert!(matches!(result, Err(ClientError::UnknownMessage(_))));
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let mut session = local_session(AgentType::Text);
        session.send_message("hello").await.unwrap();
        session.clear();
        assert!(session.messages().is_empty());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_remote_failure_records_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/agents/1/chat")
            .with_status(404)
            .with_body(r#"{"success":false,"error":"Agent not found"}"#)
            .create_async()
            .await;

        let mut session = ChatSession::remote(ApiClient::new(server.url()), "1");
        let result = session.send_message("hello").await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(session.messages().is_empty());
        assert_eq!(session.error(), Some("API error (404): Agent not found"));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_mode_switch_overrides_agent_type() {
        let mut session = local_session(AgentType::Text);
        assert_eq!(session.mode(), AgentType::Text);

        session.set_mode(AgentType::Image);
        session.send_message("a lighthouse").await.unwrap();

        let reply = &session.messages()[1];
        assert_eq!(reply.message_type, MessageType::Image);
        assert_eq!(reply.content, "Generated image based on: \"a lighthouse\"");

        session.set_mode(AgentType::Text);
        session.send_message("a lighthouse").await.unwrap();
        assert!(text_templates("a lighthouse").contains(&session.messages()[3].content));
    }

    #[test]
    fn test_for_agent_opens_with_greeting() {
        let agent = Collection::<Agent>::new().create(NewAgent::new(
            "Code Assistant",
            "Helps with programming tasks",
            AgentType::Text,
        ));

        let session = ChatSession::for_agent(&agent);

        assert_eq!(session.mode(), AgentType::Text);
        assert_eq!(session.messages().len(), 1);
        let greeting = &session.messages()[0];
        assert_eq!(greeting.sender, MessageSender::Agent);
        assert_eq!(greeting.agent_id, agent.id);
        assert_eq!(
            greeting.content,
            "Hello! I'm Code Assistant. Helps with programming tasks. How can I help you today?"
        );
    }

    #[tokio::test]
    async fn test_select_choice_appends_user_message() {
        let mut session = local_session(AgentType::Text);
        session.send_message("run the demo").await.unwrap();

        let selected = session.select_choice("option2");

        assert_eq!(selected.sender, MessageSender::User);
        assert_eq!(selected.content, "You selected: option2");
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2], selected);
    }

    #[tokio::test]
    #[serial]
    async fn test_failed_remote_edit_keeps_transcript() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/agents/1/chat")
            .with_status(500)
            .with_body(r#"{"success":false,"error":"Internal server error"}"#)
            .create_async()
            .await;

        let mut session = ChatSession::remote(ApiClient::new(server.url()), "1");
        for (i, sender) in [MessageSender::User, MessageSender::Agent]
            .into_iter()
            .cycle()
            .take(4)
            .enumerate()
        {
            let message = MessageDraft::text("1", sender, format!("turn {}", i))
                .into_message(format!("id{}", i));
            session.messages.push(message);
        }
        let before = session.messages().to_vec();

        let result = session.edit_message("id0", "rewritten").await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert_eq!(session.messages(), before.as_slice());
        assert_eq!(session.error(), Some("API error (500): Internal server error"));
        assert!(!session.is_loading());
    }
}
