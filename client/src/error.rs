//! Error types for the client library
//!
//! Each concern has its own enum: talking to the agent API, mutating the
//! conversation store and editing the document selection. Persistence
//! errors live next to the snapshot code in [`crate::store`].

use thiserror::Error;

/// Errors raised while talking to the remote agent API
///
/// All of these are "transport" failures from the point of view of a chat
/// exchange: the backend never produced a usable `{status, ...}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP request could not be sent or the connection failed
    #[error("Failed to send HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Agent API returned error status {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body (may be empty)
        body: String,
    },

    /// The response body was not the JSON we expected
    #[error("Failed to parse JSON response: {0}")]
    Decode(String),

    /// A local file selected for upload could not be read
    #[error("Failed to read file for upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`crate::store::ConversationStore`] mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No conversation with the given ID exists
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
}

/// Errors raised while editing the RAG document selection
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The backend only indexes a fixed set of document types
    #[error("Unsupported file type: {0}")]
    UnsupportedExtension(String),

    /// The same path is already part of the selection
    #[error("File already selected: {0}")]
    AlreadySelected(String),

    /// The file metadata could not be read
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        /// Path as given by the caller
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Only the RAG panel keeps a document selection
    #[error("This agent does not accept documents")]
    NoDocumentSupport,
}
