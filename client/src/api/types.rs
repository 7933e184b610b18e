//! Agent API wire types
//!
//! Request and response bodies for the `/{agent}/chat`, `/{agent}/upload`
//! and `/{agent}/generate-vector-db` endpoints.

use crate::store::FileSummary;
use serde::{Deserialize, Serialize};

/// `status` value of a successful response
pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /{agent}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
    /// Conversation the message belongs to
    pub conversation_id: String,
    /// Output structure hint (web search only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// Response of `POST /{agent}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// `"success"` or an error marker
    pub status: String,
    /// Answer text on success, error reason otherwise
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatResponse {
    /// True if the backend reported success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Descriptor of a file stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Original file name
    pub name: String,
    /// Backend-side storage path
    pub path: String,
    /// Size in bytes
    pub size: u64,
}

/// Response of `POST /{agent}/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// `"success"` or an error marker
    pub status: String,
    /// Files the backend accepted
    #[serde(default)]
    pub files: Vec<StoredFile>,
    /// Error reason, if any
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// True if the backend reported success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Body of `POST /{agent}/generate-vector-db`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDbRequest {
    /// Files returned by a previous upload
    pub file_paths: Vec<StoredFile>,
    /// Conversation the index belongs to
    pub conversation_id: String,
}

/// Response of `POST /{agent}/generate-vector-db`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorDbResponse {
    /// `"success"` or an error marker
    pub status: String,
    /// Details or error reason
    #[serde(default)]
    pub message: Option<String>,
}

impl VectorDbResponse {
    /// True if the backend reported success
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// One file part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the part's `filename`
    pub name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl From<&[StoredFile]> for FileSummary {
    fn from(files: &[StoredFile]) -> Self {
        FileSummary::from_named_sizes(files.iter().map(|f| (f.name.clone(), f.size)))
    }
}
