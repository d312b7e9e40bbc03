use super::poller::poll_until_complete;
use crate::api::{ApiError, DocumentBackend};
use crate::types::DocumentId;
use std::time::Duration;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Chunk count that renders as a full progress bar. Display heuristic only.
const PROGRESS_FULL_CHUNKS: u32 = 10;
const COMPLETED_PROGRESS: u32 = 100;

const NOT_A_PDF: &str = "Please upload a PDF file";
const NO_FILE: &str = "Please select a file";
const ALREADY_RUNNING: &str = "An upload is already in progress";
const PROCESSING_STARTED: &str = "Processing started...";
const PROCESSING_DONE: &str = "Document processed successfully!";
const UPLOAD_FAILED: &str = "Upload failed. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// Builds a file whose declared media type is guessed from its name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name);
        Self {
            name,
            media_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

pub fn media_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
    Polling(DocumentId),
    Completed,
    Failed,
}

/// What [`run_upload`] reports as the session advances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadUpdate {
    Accepted(DocumentId),
    Failed(String),
    Progress(u32),
    Completed(DocumentId),
}

/// One upload/poll cycle as seen by the upload panel.
///
/// Only one cycle may run at a time: while uploading or polling, new
/// selections and submissions are refused.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadSession {
    file: Option<PickedFile>,
    phase: UploadPhase,
    progress: Option<u32>,
    notice: Option<Notice>,
}

impl UploadSession {
    pub fn file(&self) -> Option<&PickedFile> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Last reported chunk count, `None` before the first submission.
    pub fn progress(&self) -> Option<u32> {
        self.progress
    }

    pub fn progress_percent(&self) -> Option<u32> {
        self.progress.map(progress_percent)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading | UploadPhase::Polling(_))
    }

    /// Returns whether the file became the selection.
    pub fn select_file(&mut self, file: PickedFile) -> bool {
        if self.is_busy() {
            self.notice = Some(Notice::error(ALREADY_RUNNING));
            return false;
        }
        if !file.is_pdf() {
            tracing::debug!(file = %file.name, media_type = %file.media_type, "rejected non-PDF selection");
            self.notice = Some(Notice::error(NOT_A_PDF));
            return false;
        }
        self.file = Some(file);
        self.phase = UploadPhase::Idle;
        self.progress = None;
        self.notice = None;
        true
    }

    /// Moves to `Uploading` and hands back the file to send, or records why
    /// nothing can be sent.
    pub fn begin_upload(&mut self) -> Option<PickedFile> {
        if self.is_busy() {
            self.notice = Some(Notice::error(ALREADY_RUNNING));
            return None;
        }
        let Some(file) = self.file.clone() else {
            self.notice = Some(Notice::error(NO_FILE));
            return None;
        };
        self.phase = UploadPhase::Uploading;
        self.progress = Some(0);
        self.notice = None;
        Some(file)
    }

    pub fn apply(&mut self, update: &UploadUpdate) {
        match update {
            UploadUpdate::Accepted(id) => {
                self.phase = UploadPhase::Polling(id.clone());
                self.notice = Some(Notice::info(PROCESSING_STARTED));
            }
            UploadUpdate::Failed(message) => {
                self.phase = UploadPhase::Failed;
                self.notice = Some(Notice::error(message.clone()));
            }
            UploadUpdate::Progress(chunks) => {
                if matches!(self.phase, UploadPhase::Polling(_)) {
                    self.progress = Some(*chunks);
                }
            }
            UploadUpdate::Completed(_) => {
                self.phase = UploadPhase::Completed;
                self.progress = Some(COMPLETED_PROGRESS);
                self.notice = Some(Notice::success(PROCESSING_DONE));
            }
        }
    }
}

pub fn progress_percent(chunks: u32) -> u32 {
    (chunks.saturating_mul(100) / PROGRESS_FULL_CHUNKS).min(100)
}

pub fn upload_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Server { .. } => err.server_message().unwrap_or(UPLOAD_FAILED).to_string(),
        ApiError::Transport(detail) | ApiError::Decode(detail) => {
            format!("Error uploading file: {detail}")
        }
    }
}

/// Uploads `file`, then polls its ingestion status every `every` until the
/// backend reports completion.
///
/// Returns the document id once ingestion completes, `None` if the upload
/// itself failed.
pub async fn run_upload<B, F>(
    backend: &B,
    file: &PickedFile,
    every: Duration,
    mut on_update: F,
) -> Option<DocumentId>
where
    B: DocumentBackend + ?Sized,
    F: FnMut(UploadUpdate),
{
    let accepted = match backend.upload(file).await {
        Ok(accepted) => accepted,
        Err(err) => {
            tracing::error!(file = %file.name, "upload failed: {err}");
            on_update(UploadUpdate::Failed(upload_failure_message(&err)));
            return None;
        }
    };

    let id = accepted.document_id;
    on_update(UploadUpdate::Accepted(id.clone()));

    poll_until_complete(backend, &id, every, |chunks| {
        on_update(UploadUpdate::Progress(chunks))
    })
    .await;

    on_update(UploadUpdate::Completed(id.clone()));
    Some(id)
}
