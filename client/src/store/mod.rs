// Store module
// Handles conversations, the current-conversation pointer and persistence

pub mod conversation_store;
pub mod model;
pub mod persistence;
mod seed;

pub use conversation_store::ConversationStore;
pub use model::{
    AgentType, Conversation, ConversationId, ConversationPatch, FileSummary, Message,
    MessageRole,
};
pub use persistence::{PersistenceError, StoreFile, StoreSnapshot};
