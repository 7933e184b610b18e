//! HTTP implementation of the agent API
//!
//! Talks to the agent backend over JSON and multipart requests.
//! One shared `reqwest::Client` is reused for connection pooling.

use super::types::{
    ChatRequest, ChatResponse, UploadFile, UploadResponse, VectorDbRequest, VectorDbResponse,
};
use super::AgentApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::store::AgentType;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Agent API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpAgentApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgentApi {
    /// Build a client from configuration (base URL and request timeout)
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_base_url(client, &config.api_base_url))
    }

    /// Build a client around an existing `reqwest::Client` (used by tests)
    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, agent: AgentType, action: &str) -> String {
        format!("{}/{}/{}", self.base_url, agent.as_str(), action)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(url = %url, "Calling agent API");
        let response = self.client.post(url).json(body).send().await?;
        read_json(url, response).await
    }
}

/// Check the status and decode the JSON body of an agent API response
async fn read_json<R: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        tracing::error!(
            url = %url,
            status_code = status.as_u16(),
            error_body = %body,
            "Agent API returned error status"
        );
        return Err(ApiError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ApiError::Decode(format!("{} - Response body: {}", e, body)))
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn chat(
        &self,
        agent: AgentType,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ApiError> {
        let url = self.endpoint(agent, "chat");
        self.post_json(&url, request).await
    }

    async fn upload(
        &self,
        agent: AgentType,
        conversation_id: &str,
        files: Vec<UploadFile>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.endpoint(agent, "upload");
        let file_count = files.len();

        let mut form = Form::new();
        for file in files {
            form = form.part("files", Part::bytes(file.bytes).file_name(file.name));
        }
        form = form.text("conversation_id", conversation_id.to_string());

        tracing::debug!(url = %url, file_count, "Uploading files to agent API");
        let response = self.client.post(&url).multipart(form).send().await?;
        read_json(&url, response).await
    }

    async fn generate_vector_db(
        &self,
        agent: AgentType,
        request: &VectorDbRequest,
    ) -> Result<VectorDbResponse, ApiError> {
        let url = self.endpoint(agent, "generate-vector-db");
        self.post_json(&url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::StoredFile;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_for(server: &Server) -> HttpAgentApi {
        HttpAgentApi::with_base_url(reqwest::Client::new(), &format!("{}/api/", server.url()))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpAgentApi::with_base_url(reqwest::Client::new(), "http://localhost:5328/api/");
        assert_eq!(api.base_url(), "http://localhost:5328/api");
        assert_eq!(
            api.endpoint(AgentType::WebSearch, "chat"),
            "http://localhost:5328/api/websearch/chat"
        );
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/global/chat")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "message": "Hello",
                "conversation_id": "conv-1"
            })))
            .with_status(200)
            .with_body(r#"{"status":"success","response":"Hi"}"#)
            .create_async()
            .await;

        let request = ChatRequest {
            message: "Hello".to_string(),
            conversation_id: "conv-1".to_string(),
            schema: None,
        };
        let response = api_for(&server)
            .chat(AgentType::Global, &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.response.as_deref(), Some("Hi"));
    }

    #[tokio::test]
    async fn test_chat_sends_schema_for_websearch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/websearch/chat")
            .match_body(Matcher::PartialJson(json!({ "schema": "### Name" })))
            .with_status(200)
            .with_body(r#"{"status":"success","response":"found"}"#)
            .create_async()
            .await;

        let request = ChatRequest {
            message: "Acme".to_string(),
            conversation_id: "conv-9".to_string(),
            schema: Some("### Name".to_string()),
        };
        let result = api_for(&server).chat(AgentType::WebSearch, &request).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_chat_http_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/rag/chat")
            .with_status(400)
            .with_body(r#"{"error":"Message is required"}"#)
            .create_async()
            .await;

        let request = ChatRequest {
            message: String::new(),
            conversation_id: "conv-1".to_string(),
            schema: None,
        };
        let result = api_for(&server).chat(AgentType::Rag, &request).await;

        mock.assert_async().await;
        match result {
            Err(ApiError::HttpStatus { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("Message is required"));
            }
            other => panic!("expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/global/chat")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let request = ChatRequest {
            message: "Hello".to_string(),
            conversation_id: "conv-1".to_string(),
            schema: None,
        };
        let result = api_for(&server).chat(AgentType::Global, &request).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_upload_multipart() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/rag/upload")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data; boundary=.*".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="files"; filename="notes.txt""#.to_string()),
                Matcher::Regex("alpha beta".to_string()),
                Matcher::Regex(r#"name="conversation_id""#.to_string()),
                Matcher::Regex("conv-42".to_string()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"status":"success","files":[{"name":"notes.txt","path":"uploaded_files/notes.txt","size":10}]}"#,
            )
            .create_async()
            .await;

        let files = vec![UploadFile {
            name: "notes.txt".to_string(),
            bytes: b"alpha beta".to_vec(),
        }];
        let response = api_for(&server)
            .upload(AgentType::Rag, "conv-42", files)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(
            response.files,
            vec![StoredFile {
                name: "notes.txt".to_string(),
                path: "uploaded_files/notes.txt".to_string(),
                size: 10,
            }]
        );
    }

    #[tokio::test]
    async fn test_generate_vector_db() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/rag/generate-vector-db")
            .match_body(Matcher::Json(json!({
                "file_paths": [{"name": "a.pdf", "path": "uploaded_files/a.pdf", "size": 3}],
                "conversation_id": "conv-7"
            })))
            .with_status(200)
            .with_body(r#"{"status":"success","message":"Vector DB created"}"#)
            .create_async()
            .await;

        let request = VectorDbRequest {
            file_paths: vec![StoredFile {
                name: "a.pdf".to_string(),
                path: "uploaded_files/a.pdf".to_string(),
                size: 3,
            }],
            conversation_id: "conv-7".to_string(),
        };
        let response = api_for(&server)
            .generate_vector_db(AgentType::Rag, &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.message.as_deref(), Some("Vector DB created"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on port 9 on a test machine
        let api = HttpAgentApi::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9/api");
        let request = ChatRequest {
            message: "Hello".to_string(),
            conversation_id: "conv-1".to_string(),
            schema: None,
        };
        let result = api.chat(AgentType::Global, &request).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
