//! Chat module
//!
//! Shared reply simulation used by the chat endpoint and the client-side
//! chat session.

pub mod simulation;

pub use simulation::{interactive_response, simulate_response, simulate_response_with, user_message};
