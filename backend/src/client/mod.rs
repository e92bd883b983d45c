//! Client module
//!
//! Typed access to the agent hub API and the chat window state built on it.

pub mod api_client;
pub mod chat_session;
pub mod error;

pub use api_client::ApiClient;
pub use chat_session::{ChatBackend, ChatSession};
pub use error::ClientError;
