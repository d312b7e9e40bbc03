//! HTTP boundary to the document backend
//!
//! Every view talks to the backend through the [`DocumentBackend`] trait.
//! [`ApiClient`] is the reqwest implementation used by the app; tests drive
//! the session logic with in-memory fakes.
//!
//! # Usage
//!
//! ```rust,no_run
//! use docqa::api::{ApiClient, DocumentBackend};
//!
//! # async fn example() -> docqa::api::ApiResult<()> {
//! let api = ApiClient::new("http://localhost:8000/api");
//! for doc in api.list_documents().await? {
//!     println!("{} {}", doc.id, doc.filename);
//! }
//! # Ok(())
//! # }
//! ```

mod client;

use crate::session::upload::PickedFile;
use crate::types::{Document, DocumentId, IngestionStatus, UploadAccepted};
use async_trait::async_trait;

pub use client::{ApiClient, ApiError, ApiResult};

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait DocumentBackend: Send + Sync {
    /// `POST /upload/` with the file as multipart field `file`.
    async fn upload(&self, file: &PickedFile) -> ApiResult<UploadAccepted>;

    /// `GET /status/{id}/`
    async fn status(&self, id: &DocumentId) -> ApiResult<IngestionStatus>;

    /// `GET /documents/`
    async fn list_documents(&self) -> ApiResult<Vec<Document>>;

    /// `DELETE /documents/{id}/`; the response body is ignored on success.
    async fn delete_document(&self, id: &DocumentId) -> ApiResult<()>;

    /// `POST /query/` returning the answer text.
    async fn query(&self, question: &str) -> ApiResult<String>;
}
