// Conversation persistence module
// Handles saving and loading the conversation store to/from a JSON file

use super::conversation_store::ConversationStore;
use super::model::{Conversation, ConversationId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

/// Error types for persistence operations
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Snapshot written by an incompatible version
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
}

/// Serializable form of the whole conversation store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Version of the snapshot format (for future migration support)
    pub version: u32,
    /// Map of conversation ID to conversation
    pub conversations: HashMap<ConversationId, Conversation>,
    /// ID of the conversation that was active
    pub current_conversation_id: Option<ConversationId>,
}

impl StoreSnapshot {
    /// Create a snapshot in the current format
    pub fn new(
        conversations: HashMap<ConversationId, Conversation>,
        current_conversation_id: Option<ConversationId>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            conversations,
            current_conversation_id,
        }
    }
}

/// Snapshot file operations
pub struct StoreFile;

impl StoreFile {
    /// Save a snapshot to a JSON file
    ///
    /// The parent directory is created if needed. The file is written to a
    /// sibling temp file first and renamed into place.
    pub fn save_to_file<P: AsRef<Path>>(
        snapshot: &StoreSnapshot,
        path: P,
    ) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Option<StoreSnapshot>, PersistenceError> {
        if !path.as_ref().exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path.as_ref())?;
        let snapshot: StoreSnapshot = serde_json::from_str(&json)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(snapshot.version));
        }

        Ok(Some(snapshot))
    }

    /// Load the store from `path`, falling back to the example conversations
    /// when no snapshot has been written yet
    pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Result<ConversationStore, PersistenceError> {
        match Self::load_from_file(path.as_ref())? {
            Some(snapshot) => {
                tracing::info!(
                    path = %path.as_ref().display(),
                    conversations = snapshot.conversations.len(),
                    "Loaded conversation snapshot"
                );
                Ok(ConversationStore::from_snapshot(snapshot))
            }
            None => {
                tracing::info!(
                    path = %path.as_ref().display(),
                    "No conversation snapshot found, seeding examples"
                );
                Ok(ConversationStore::with_examples())
            }
        }
    }

    /// Save the store to `path`
    pub fn save_store<P: AsRef<Path>>(
        store: &ConversationStore,
        path: P,
    ) -> Result<(), PersistenceError> {
        Self::save_to_file(&store.snapshot(), path)
    }
}
