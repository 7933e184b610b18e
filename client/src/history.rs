//! Conversation history
//!
//! Read model for the history side panel plus the selection operation.

use crate::format::{format_file_count, format_relative_age};
use crate::store::{AgentType, ConversationId, ConversationStore};

/// Shown when the store has no conversations
pub const EMPTY_HISTORY_TITLE: &str = "No conversations yet";

/// Secondary line of the empty history panel
pub const EMPTY_HISTORY_HINT: &str =
    "Start chatting with an agent to create a conversation history";

/// One row of the history panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Conversation ID
    pub id: ConversationId,
    /// Agent the conversation belongs to
    pub agent_type: AgentType,
    /// Conversation title
    pub title: String,
    /// `"1 message"`, `"4 messages"`
    pub message_count_label: String,
    /// `"about 2 hours ago"`
    pub age_label: String,
    /// `"2 files (3.3 MB)"`, when documents are attached
    pub files_label: Option<String>,
    /// True for the store's current conversation
    pub is_current: bool,
}

/// History rows, newest first
pub fn history_entries(store: &ConversationStore, now_ms: i64) -> Vec<HistoryEntry> {
    let current = store.current_conversation_id();
    store
        .conversations_by_recency()
        .into_iter()
        .map(|c| HistoryEntry {
            id: c.id.clone(),
            agent_type: c.agent_type,
            title: c.title.clone(),
            message_count_label: message_count_label(c.messages.len()),
            age_label: format_relative_age(c.timestamp, now_ms),
            files_label: c
                .files
                .as_ref()
                .map(|f| format_file_count(f.count, f.total_size)),
            is_current: current == Some(c.id.as_str()),
        })
        .collect()
}

/// Make `id` the current conversation
///
/// Returns the agent type whose tab should be shown, or `None` (and leaves
/// the store untouched) if the conversation does not exist.
pub fn select_conversation(store: &mut ConversationStore, id: &str) -> Option<AgentType> {
    let agent_type = store.get(id)?.agent_type;
    store.set_current_conversation_id(Some(id.to_string()));
    tracing::debug!(conversation_id = %id, agent = %agent_type, "Conversation selected");
    Some(agent_type)
}

fn message_count_label(count: usize) -> String {
    if count == 1 {
        "1 message".to_string()
    } else {
        format!("{} messages", count)
    }
}
