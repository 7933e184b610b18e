//! Remote agent API
//!
//! The backend exposes three endpoints per agent type. [`AgentApi`] is the
//! seam the panels and the dispatcher talk to; [`HttpAgentApi`] is the real
//! implementation.

pub mod http;
pub mod ingest;
pub mod types;

use crate::error::ApiError;
use crate::store::AgentType;
use async_trait::async_trait;

pub use http::HttpAgentApi;
pub use ingest::{IngestFailure, IngestReport};
pub use types::{
    ChatRequest, ChatResponse, StoredFile, UploadFile, UploadResponse, VectorDbRequest,
    VectorDbResponse,
};

/// Operations offered by the agent backend
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// `POST /{agent}/chat`
    async fn chat(&self, agent: AgentType, request: &ChatRequest)
        -> Result<ChatResponse, ApiError>;

    /// `POST /{agent}/upload` (multipart)
    async fn upload(
        &self,
        agent: AgentType,
        conversation_id: &str,
        files: Vec<UploadFile>,
    ) -> Result<UploadResponse, ApiError>;

    /// `POST /{agent}/generate-vector-db`
    async fn generate_vector_db(
        &self,
        agent: AgentType,
        request: &VectorDbRequest,
    ) -> Result<VectorDbResponse, ApiError>;
}
