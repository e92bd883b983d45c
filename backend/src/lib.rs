//! Agent Hub Backend Library
//!
//! In-memory resource store, REST endpoints, reply simulation and a typed
//! API client for the agent hub. The server binary is in `src/main.rs`.

pub mod api;
/// Reply simulation shared by the server and the client
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
/// Resource store
///
/// Holds agents, conversations and tools in process memory.
pub mod state;
