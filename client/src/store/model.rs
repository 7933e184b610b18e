//! Conversation data models
//!
//! Defines agent types, conversations and messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a conversation
pub type ConversationId = String;

/// Title derivation keeps this many characters of the first user message
pub const TITLE_MAX_CHARS: usize = 30;

/// Backend persona a conversation is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// General assistant
    Global,
    /// Retrieval-augmented document assistant
    Rag,
    /// Web search assistant
    WebSearch,
}

impl AgentType {
    /// All agent types, in tab order
    pub const ALL: [AgentType; 3] = [AgentType::Global, AgentType::Rag, AgentType::WebSearch];

    /// Path segment used by the agent API (`/{agent}/chat`)
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Global => "global",
            AgentType::Rag => "rag",
            AgentType::WebSearch => "websearch",
        }
    }

    /// Tab label
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentType::Global => "Global Agent",
            AgentType::Rag => "RAG Agent",
            AgentType::WebSearch => "Web Search Agent",
        }
    }

    /// Title given to a freshly created conversation
    pub fn default_title(&self) -> &'static str {
        match self {
            AgentType::Global => "New conversation",
            AgentType::Rag => "Document analysis",
            AgentType::WebSearch => "Web search",
        }
    }

    /// True if `title` is one of the placeholder titles of any agent type
    pub fn is_default_title(title: &str) -> bool {
        Self::ALL.iter().any(|agent| agent.default_title() == title)
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the agent
    Assistant,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message
    pub role: MessageRole,
    /// Message text (rendered as rich text)
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Documents associated with a conversation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileSummary {
    /// Number of documents
    pub count: usize,
    /// Document names, in upload order
    pub names: Vec<String>,
    /// Combined size in bytes
    pub total_size: u64,
}

impl FileSummary {
    /// Build a summary from `(name, size)` pairs
    pub fn from_named_sizes<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut summary = Self::default();
        for (name, size) in entries {
            summary.names.push(name);
            summary.total_size += size;
        }
        summary.count = summary.names.len();
        summary
    }
}

/// A conversation thread bound to one agent type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique identifier, immutable
    pub id: ConversationId,
    /// Human-readable label
    pub title: String,
    /// Agent the conversation talks to, fixed for its lifetime
    pub agent_type: AgentType,
    /// Messages in display order
    pub messages: Vec<Message>,
    /// Last modification time (Unix milliseconds)
    pub timestamp: i64,
    /// Associated documents, if any were uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileSummary>,
}

impl Conversation {
    /// Create an empty conversation with the agent's default title
    pub fn new(id: ConversationId, agent_type: AgentType, timestamp: i64) -> Self {
        Self {
            id,
            title: agent_type.default_title().to_string(),
            agent_type,
            messages: Vec::new(),
            timestamp,
            files: None,
        }
    }

    /// Generate a new unique conversation ID
    pub fn generate_id() -> ConversationId {
        format!("conv-{}", uuid::Uuid::new_v4())
    }
}

/// Fields that [`crate::store::ConversationStore::update_conversation`]
/// merges into an existing conversation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationPatch {
    /// Replace the title
    pub title: Option<String>,
    /// Replace the message list
    pub messages: Option<Vec<Message>>,
    /// Replace the document summary
    pub files: Option<FileSummary>,
}

/// Title derived from the first user message
pub(crate) fn derive_title(content: &str) -> String {
    if content.chars().count() > TITLE_MAX_CHARS {
        let head: String = content.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}
