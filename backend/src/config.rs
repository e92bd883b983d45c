//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Chat simulation configuration
    pub chat: ChatConfig,
    /// Resource store configuration
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Chat simulation configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Simulated processing time before a reply is produced (in milliseconds)
    pub delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl ChatConfig {
    /// Simulated processing time as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Resource store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Start with the demo agents, tools and conversation
    pub seed_demo_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                host: env::var("HOST").unwrap_or(defaults.server.host),
            },
            chat: ChatConfig {
                delay_ms: env::var("CHAT_DELAY_MS")
                    .ok()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(defaults.chat.delay_ms),
            },
            store: StoreConfig {
                seed_demo_data: env::var("SEED_DEMO_DATA")
                    .ok()
                    .and_then(|s| parse_flag(&s))
                    .unwrap_or(defaults.store.seed_demo_data),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
