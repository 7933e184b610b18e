// Conversation store
// Owns every conversation plus the pointer to the active one

use super::model::{
    derive_title, AgentType, Conversation, ConversationId, ConversationPatch, FileSummary,
    Message, MessageRole,
};
use super::persistence::StoreSnapshot;
use crate::error::StoreError;
use chrono::Utc;
use std::collections::HashMap;

/// Conversation store
///
/// Holds all conversations keyed by ID and the ID of the conversation the UI
/// is currently showing. The current ID is only a reference: it is
/// re-validated on every read and may point at nothing.
///
/// All mutation goes through the methods below. The store is owned by a
/// single thread (the UI thread); callers that share it across threads must
/// wrap it in a mutex.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: HashMap<ConversationId, Conversation>,
    current_conversation_id: Option<ConversationId>,
    /// Last timestamp handed out, keeps timestamps strictly increasing
    last_timestamp: i64,
    /// Bumped on every mutation, used to decide when to persist
    revision: u64,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the example conversations
    pub fn with_examples() -> Self {
        let mut store = Self::new();
        for conversation in super::seed::example_conversations(Utc::now().timestamp_millis()) {
            store.insert(conversation);
        }
        store
    }

    /// Rebuild a store from a persisted snapshot
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let last_timestamp = snapshot
            .conversations
            .values()
            .map(|c| c.timestamp)
            .max()
            .unwrap_or_default();
        Self {
            conversations: snapshot.conversations,
            current_conversation_id: snapshot.current_conversation_id,
            last_timestamp,
            revision: 0,
        }
    }

    /// Capture the persisted part of the store
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(
            self.conversations.clone(),
            self.current_conversation_id.clone(),
        )
    }

    /// Insert (or replace) a fully built conversation
    pub fn insert(&mut self, conversation: Conversation) {
        self.last_timestamp = self.last_timestamp.max(conversation.timestamp);
        self.conversations
            .insert(conversation.id.clone(), conversation);
        self.revision += 1;
    }

    /// Create a new conversation for `agent_type` and make it current
    ///
    /// Returns the new ID, which is immediately resolvable.
    pub fn add_conversation(&mut self, agent_type: AgentType) -> ConversationId {
        let mut id = Conversation::generate_id();
        while self.conversations.contains_key(&id) {
            id = Conversation::generate_id();
        }
        let timestamp = self.next_timestamp();
        self.conversations
            .insert(id.clone(), Conversation::new(id.clone(), agent_type, timestamp));
        self.current_conversation_id = Some(id.clone());
        self.revision += 1;

        tracing::debug!(conversation_id = %id, agent = %agent_type, "Conversation created");
        id
    }

    /// Merge `patch` into an existing conversation and refresh its timestamp
    pub fn update_conversation(
        &mut self,
        id: &str,
        patch: ConversationPatch,
    ) -> Result<(), StoreError> {
        let timestamp = self.next_timestamp();
        let conversation = self.get_mut(id)?;
        if let Some(title) = patch.title {
            conversation.title = title;
        }
        if let Some(messages) = patch.messages {
            conversation.messages = messages;
        }
        if let Some(files) = patch.files {
            conversation.files = Some(files);
        }
        conversation.timestamp = timestamp;
        self.revision += 1;
        Ok(())
    }

    /// Append a message to a conversation
    ///
    /// The first user message of a conversation that still carries a default
    /// title replaces the title with a shortened copy of the message.
    pub fn add_message(&mut self, id: &str, message: Message) -> Result<(), StoreError> {
        let timestamp = self.next_timestamp();
        let conversation = self.get_mut(id)?;
        if message.role == MessageRole::User
            && conversation.messages.is_empty()
            && AgentType::is_default_title(&conversation.title)
        {
            conversation.title = derive_title(&message.content);
        }
        conversation.messages.push(message);
        conversation.timestamp = timestamp;
        self.revision += 1;
        Ok(())
    }

    /// Replace the document summary of a conversation
    pub fn update_conversation_files(
        &mut self,
        id: &str,
        files: FileSummary,
    ) -> Result<(), StoreError> {
        let timestamp = self.next_timestamp();
        let conversation = self.get_mut(id)?;
        conversation.files = Some(files);
        conversation.timestamp = timestamp;
        self.revision += 1;
        Ok(())
    }

    /// Point the store at a conversation (or at none)
    ///
    /// Existence is not checked; reads re-validate instead.
    pub fn set_current_conversation_id(&mut self, id: Option<ConversationId>) {
        if self.current_conversation_id != id {
            self.current_conversation_id = id;
            self.revision += 1;
        }
    }

    /// ID of the current conversation, if it still exists
    pub fn current_conversation_id(&self) -> Option<&str> {
        self.current_conversation().map(|c| c.id.as_str())
    }

    /// The current conversation, or `None` if unset or stale
    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.current_conversation_id
            .as_ref()
            .and_then(|id| self.conversations.get(id))
    }

    /// Look up a conversation by ID
    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// All conversations, newest first
    pub fn conversations_by_recency(&self) -> Vec<&Conversation> {
        let mut conversations: Vec<&Conversation> = self.conversations.values().collect();
        conversations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        conversations
    }

    /// Number of conversations
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// True if there are no conversations
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Mutation counter; changes whenever the persisted state changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Conversation, StoreError> {
        self.conversations
            .get_mut(id)
            .ok_or_else(|| StoreError::ConversationNotFound(id.to_string()))
    }

    fn next_timestamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation_at(id: &str, timestamp: i64) -> Conversation {
        Conversation::new(id.to_string(), AgentType::Global, timestamp)
    }

    #[test]
    fn test_store_creation() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        assert!(store.current_conversation().is_none());
    }

    #[test]
    fn test_with_examples_seeds_one_per_agent() {
        let store = ConversationStore::with_examples();
        assert_eq!(store.len(), 3);
        assert!(store.current_conversation().is_none());
        for agent in AgentType::ALL {
            assert!(store
                .conversations_by_recency()
                .iter()
                .any(|c| c.agent_type == agent));
        }
    }

    #[test]
    fn test_add_conversation_becomes_current() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Rag);

        let current = store.current_conversation().unwrap();
        assert_eq!(current.id, id);
        assert_eq!(current.title, "Document analysis");
        assert_eq!(current.agent_type, AgentType::Rag);
        assert!(current.messages.is_empty());
        assert!(current.files.is_none());
    }

    #[test]
    fn test_add_conversation_ids_are_fresh() {
        let mut store = ConversationStore::with_examples();
        let mut seen: Vec<String> = store
            .conversations_by_recency()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        for _ in 0..20 {
            let id = store.add_conversation(AgentType::Global);
            assert!(!seen.contains(&id));
            assert_eq!(store.current_conversation_id(), Some(id.as_str()));
            seen.push(id);
        }
    }

    #[test]
    fn test_messages_keep_call_order() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Global);
        let sent: Vec<Message> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{}", i))
                } else {
                    Message::assistant(format!("a{}", i))
                }
            })
            .collect();
        for message in &sent {
            store.add_message(&id, message.clone()).unwrap();
        }
        assert_eq!(store.get(&id).unwrap().messages, sent);
    }

    #[test]
    fn test_title_derived_once() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Global);
        assert_eq!(store.get(&id).unwrap().title, "New conversation");

        store.add_message(&id, Message::user("X".repeat(40))).unwrap();
        let expected = format!("{}...", "X".repeat(30));
        assert_eq!(store.get(&id).unwrap().title, expected);

        store.add_message(&id, Message::user("Something else")).unwrap();
        assert_eq!(store.get(&id).unwrap().title, expected);
    }

    #[test]
    fn test_assistant_message_does_not_set_title() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::WebSearch);
        store.add_message(&id, Message::assistant("Welcome")).unwrap();
        assert_eq!(store.get(&id).unwrap().title, "Web search");
    }

    #[test]
    fn test_custom_title_is_kept() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Global);
        store
            .update_conversation(
                &id,
                ConversationPatch {
                    title: Some("Budget review".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        store.add_message(&id, Message::user("Hello")).unwrap();
        assert_eq!(store.get(&id).unwrap().title, "Budget review");
    }

    #[test]
    fn test_update_conversation_files_replaces() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Rag);
        store
            .update_conversation_files(
                &id,
                FileSummary::from_named_sizes(vec![
                    ("a.pdf".to_string(), 10),
                    ("b.pdf".to_string(), 20),
                ]),
            )
            .unwrap();
        let second = FileSummary::from_named_sizes(vec![("c.txt".to_string(), 5)]);
        store.update_conversation_files(&id, second.clone()).unwrap();

        assert_eq!(store.get(&id).unwrap().files, Some(second));
    }

    #[test]
    fn test_mutations_refresh_timestamp() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Global);
        let created = store.get(&id).unwrap().timestamp;

        store.add_message(&id, Message::user("hi")).unwrap();
        let after_message = store.get(&id).unwrap().timestamp;
        assert!(after_message > created);

        store
            .update_conversation_files(&id, FileSummary::default())
            .unwrap();
        assert!(store.get(&id).unwrap().timestamp > after_message);
    }

    #[test]
    fn test_unknown_id_is_reported_and_ignored() {
        let mut store = ConversationStore::with_examples();
        let before = store.snapshot();

        assert_eq!(
            store.add_message("missing", Message::user("hi")),
            Err(StoreError::ConversationNotFound("missing".to_string()))
        );
        assert!(store
            .update_conversation_files("missing", FileSummary::default())
            .is_err());
        assert!(store
            .update_conversation("missing", ConversationPatch::default())
            .is_err());

        assert_eq!(store.snapshot(), before);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_stale_current_id_reads_as_none() {
        let mut store = ConversationStore::new();
        store.set_current_conversation_id(Some("gone".to_string()));
        assert!(store.current_conversation().is_none());
        assert!(store.current_conversation_id().is_none());
    }

    #[test]
    fn test_conversations_by_recency() {
        let mut store = ConversationStore::new();
        store.insert(conversation_at("ten", 10));
        store.insert(conversation_at("thirty", 30));
        store.insert(conversation_at("twenty", 20));

        let timestamps: Vec<i64> = store
            .conversations_by_recency()
            .iter()
            .map(|c| c.timestamp)
            .collect();
        assert_eq!(timestamps, vec![30, 20, 10]);
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut store = ConversationStore::new();
        let start = store.revision();
        let id = store.add_conversation(AgentType::Global);
        assert!(store.revision() > start);

        let before = store.revision();
        store.set_current_conversation_id(Some(id));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut store = ConversationStore::new();
        let id = store.add_conversation(AgentType::Global);
        store.add_message(&id, Message::user("hi")).unwrap();

        let restored = ConversationStore::from_snapshot(store.snapshot());
        assert_eq!(restored.current_conversation_id(), Some(id.as_str()));
        assert_eq!(restored.get(&id), store.get(&id));
    }
}
