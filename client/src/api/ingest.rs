//! Document ingestion pipeline
//!
//! Upload the selected files, then ask the backend to build a vector
//! database from what it stored.

use super::types::{StoredFile, UploadFile, VectorDbRequest};
use super::AgentApi;
use crate::error::ApiError;
use crate::store::AgentType;
use std::path::PathBuf;
use thiserror::Error;

/// Why an ingestion run did not produce a vector database
#[derive(Error, Debug)]
pub enum IngestFailure {
    /// The upload endpoint answered with a non-success status
    #[error("Upload failed: {}", .0.as_deref().unwrap_or("unknown"))]
    UploadRejected(Option<String>),

    /// The vector database endpoint answered with a non-success status
    #[error("Vector DB creation failed: {}", .0.as_deref().unwrap_or("unknown"))]
    BuildRejected(Option<String>),

    /// Reading files or talking to the backend failed
    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// Result of an ingestion run
#[derive(Debug)]
pub struct IngestReport {
    /// Files the backend stored, if the upload step succeeded
    pub uploaded: Option<Vec<StoredFile>>,
    /// Outcome of the whole run
    pub result: Result<(), IngestFailure>,
}

impl IngestReport {
    fn failed(uploaded: Option<Vec<StoredFile>>, failure: IngestFailure) -> Self {
        Self {
            uploaded,
            result: Err(failure),
        }
    }
}

/// Read local files into upload parts
pub async fn read_upload_files(paths: &[(String, PathBuf)]) -> Result<Vec<UploadFile>, ApiError> {
    let mut files = Vec::with_capacity(paths.len());
    for (name, path) in paths {
        let bytes = tokio::fs::read(path).await?;
        files.push(UploadFile {
            name: name.clone(),
            bytes,
        });
    }
    Ok(files)
}

/// Upload `files` and build a vector database from them
pub async fn run_ingest(
    api: &dyn AgentApi,
    agent: AgentType,
    conversation_id: &str,
    files: Vec<UploadFile>,
) -> IngestReport {
    let upload = match api.upload(agent, conversation_id, files).await {
        Ok(upload) => upload,
        Err(e) => return IngestReport::failed(None, e.into()),
    };
    if !upload.is_success() {
        return IngestReport::failed(None, IngestFailure::UploadRejected(upload.message));
    }

    tracing::info!(
        conversation_id = %conversation_id,
        agent = %agent,
        file_count = upload.files.len(),
        "Files uploaded, building vector database"
    );

    let request = VectorDbRequest {
        file_paths: upload.files,
        conversation_id: conversation_id.to_string(),
    };
    let result = match api.generate_vector_db(agent, &request).await {
        Ok(response) if response.is_success() => Ok(()),
        Ok(response) => Err(IngestFailure::BuildRejected(response.message)),
        Err(e) => Err(e.into()),
    };

    IngestReport {
        uploaded: Some(request.file_paths),
        result,
    }
}

/// Read the files at `paths`, then run [`run_ingest`]
pub async fn ingest_paths(
    api: &dyn AgentApi,
    agent: AgentType,
    conversation_id: &str,
    paths: &[(String, PathBuf)],
) -> IngestReport {
    match read_upload_files(paths).await {
        Ok(files) => run_ingest(api, agent, conversation_id, files).await,
        Err(e) => IngestReport::failed(None, e.into()),
    }
}
