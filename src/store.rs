//! Application-wide state shared by the panels.
//!
//! Panels never reach into each other. The upload panel emits [`AppEvent`]s,
//! the root reduces them into [`AppState`], and the other panels read the
//! fields they care about.

use crate::types::DocumentId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The backend took the file and ingestion has started.
    UploadAccepted(DocumentId),
    /// Ingestion finished for the document.
    IngestionCompleted(DocumentId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Set once any upload finishes ingesting; the chat panel is dimmed until then.
    pub chat_unlocked: bool,
    /// Bumped on every accepted upload; the document list re-fetches on change.
    pub refresh_generation: u64,
}

impl AppState {
    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::UploadAccepted(id) => {
                tracing::debug!(document_id = %id, "upload accepted, refreshing documents");
                self.refresh_generation = self.refresh_generation.wrapping_add(1);
            }
            AppEvent::IngestionCompleted(id) => {
                tracing::debug!(document_id = %id, "ingestion completed, unlocking chat");
                self.chat_unlocked = true;
            }
        }
    }
}
