//! Agent Chat Client Library
//!
//! Conversation state, persistence and the HTTP client for the remote agent
//! API (global, RAG and web-search agents). The egui front end in the
//! repository root drives everything through [`workbench::Workbench`] and
//! [`dispatch::Dispatcher`].

pub mod api;
pub mod config;
/// Background execution of agent API calls
pub mod dispatch;
pub mod error;
/// Display formatting for sizes and ages
pub mod format;
pub mod history;
pub mod panel;
/// Conversation store and its persistence
pub mod store;
pub mod workbench;

pub use api::{AgentApi, HttpAgentApi};
pub use config::ClientConfig;
pub use dispatch::{ApiEvent, Dispatcher};
pub use error::{ApiError, SelectionError, StoreError};
pub use store::{AgentType, Conversation, ConversationStore, Message, MessageRole};
pub use workbench::Workbench;
