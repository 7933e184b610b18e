//! Client configuration
//!
//! Centralized configuration with environment variable support and
//! sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the agent backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5328/api";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the agent API, without a trailing agent segment
    pub api_base_url: String,
    /// Per-request timeout for agent API calls (in seconds)
    pub request_timeout_secs: u64,
    /// Directory holding the persisted conversation snapshot
    pub data_dir: PathBuf,
    /// Time each decorative ingestion stage stays on screen (in milliseconds)
    pub progress_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 120,
            data_dir: default_data_dir(),
            progress_interval_ms: 800,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("AGENT_API_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout_secs: env::var("AGENT_API_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.request_timeout_secs),
            data_dir: env::var_os("AGENT_CHAT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            progress_interval_ms: env::var("AGENT_CHAT_PROGRESS_INTERVAL_MS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.progress_interval_ms),
        }
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Progress stage interval as a `Duration`
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Path of the persisted conversation snapshot
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("conversations.json")
    }
}

/// Platform data directory (e.g. ~/.local/share/agent-chat), else ~/.agent-chat,
/// else the current directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("agent-chat"))
        .or_else(|| dirs::home_dir().map(|home| home.join(".agent-chat")))
        .unwrap_or_else(|| PathBuf::from(".agent-chat"))
}
