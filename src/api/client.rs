use super::DocumentBackend;
use crate::session::upload::PickedFile;
use crate::types::{Document, DocumentId, IngestionStatus, UploadAccepted};
use async_trait::async_trait;
use reqwest::{Response, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================
// Error Types
// ============================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the backend's `{error}` field, if any.
    #[error("server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// The request never completed.
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body could not be read as the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    fn from_error_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|msg| !msg.trim().is_empty());
        ApiError::Server { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// Client
// ============================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    answer: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(ApiError::from_error_body(status.as_u16(), &body))
        }
    }

    async fn expect_success(response: Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_error_body(status.as_u16(), &body))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl DocumentBackend for ApiClient {
    async fn upload(&self, file: &PickedFile) -> ApiResult<UploadAccepted> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(file = %file.name, size = file.bytes.len(), "uploading document");
        let response = self
            .http
            .post(self.endpoint("upload/"))
            .multipart(form)
            .send()
            .await?;
        let accepted: UploadAccepted = Self::read_json(response).await?;
        if let Some(message) = &accepted.message {
            tracing::info!(document_id = %accepted.document_id, "{message}");
        }
        Ok(accepted)
    }

    async fn status(&self, id: &DocumentId) -> ApiResult<IngestionStatus> {
        let response = self
            .http
            .get(self.endpoint(&format!("status/{id}/")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_documents(&self) -> ApiResult<Vec<Document>> {
        let response = self.http.get(self.endpoint("documents/")).send().await?;
        Self::read_json(response).await
    }

    async fn delete_document(&self, id: &DocumentId) -> ApiResult<()> {
        tracing::debug!(document_id = %id, "deleting document");
        let response = self
            .http
            .delete(self.endpoint(&format!("documents/{id}/")))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn query(&self, question: &str) -> ApiResult<String> {
        let response = self
            .http
            .post(self.endpoint("query/"))
            .json(&QueryRequest { query: question })
            .send()
            .await?;
        let data: QueryResponse = Self::read_json(response).await?;
        Ok(data.answer)
    }
}
