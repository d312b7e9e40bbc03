use crate::api::{ApiError, ApiResult};
use crate::types::{Document, DocumentId};

const FETCH_FAILED: &str = "Failed to fetch documents";
const DELETE_FAILED: &str = "Failed to delete document";

/// Identifies one list request. Only the most recently issued ticket may
/// replace the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Local copy of the backend's document list plus the delete dialog state.
///
/// Deletes are applied optimistically: a confirmed 2xx drops the entry here
/// without re-fetching, so this view can run ahead of the server until the
/// next fetch replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentShelf {
    documents: Vec<Document>,
    loading: bool,
    error: Option<String>,
    latest_ticket: u64,
    pending_delete: Option<DocumentId>,
    alert: Option<String>,
}

impl Default for DocumentShelf {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            loading: true,
            error: None,
            latest_ticket: 0,
            pending_delete: None,
            alert: None,
        }
    }
}

impl DocumentShelf {
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// True until the first fetch resolves either way.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// Returns false when the result was discarded as stale.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: ApiResult<Vec<Document>>) -> bool {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(ticket = ticket.0, latest = self.latest_ticket, "dropping stale document list");
            return false;
        }
        match result {
            Ok(documents) => {
                self.documents = documents;
                self.error = None;
                // A dialog for a document that vanished must not come back later.
                if let Some(id) = &self.pending_delete {
                    if !self.documents.iter().any(|doc| &doc.id == id) {
                        self.pending_delete = None;
                    }
                }
            }
            Err(err) => {
                tracing::error!("error fetching documents: {err}");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn request_delete(&mut self, id: DocumentId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The document awaiting confirmation, if it is still listed.
    pub fn pending_delete(&self) -> Option<&Document> {
        let id = self.pending_delete.as_ref()?;
        self.documents.iter().find(|doc| &doc.id == id)
    }

    /// Closes the dialog and yields the id to delete.
    pub fn confirm_delete(&mut self) -> Option<DocumentId> {
        self.pending_delete.take()
    }

    pub fn apply_delete(&mut self, id: &DocumentId, result: ApiResult<()>) {
        match result {
            Ok(()) => self.documents.retain(|doc| &doc.id != id),
            Err(err) => {
                tracing::error!(document_id = %id, "error deleting document: {err}");
                self.alert = Some(delete_failure_message(&err));
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

pub fn delete_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Server { .. } => err.server_message().unwrap_or(DELETE_FAILED).to_string(),
        ApiError::Transport(detail) => detail.clone(),
        ApiError::Decode(_) => DELETE_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, filename: &str) -> Document {
        Document {
            id: DocumentId::new(id),
            filename: filename.to_string(),
            uploaded_at: "2024-03-01T10:15:30Z".to_string(),
            file_url: None,
        }
    }

    fn loaded(docs: Vec<Document>) -> DocumentShelf {
        let mut shelf = DocumentShelf::default();
        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(docs));
        shelf
    }

    #[test]
    fn loading_until_first_fetch_resolves() {
        let mut shelf = DocumentShelf::default();
        assert!(shelf.is_loading());
        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Err(ApiError::Transport("refused".into())));
        assert!(!shelf.is_loading());
        assert_eq!(shelf.error(), Some(FETCH_FAILED));
    }

    #[test]
    fn successful_fetch_replaces_list_and_clears_error() {
        let mut shelf = DocumentShelf::default();
        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Err(ApiError::Transport("refused".into())));

        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("1", "a.pdf"), doc("2", "b.pdf")]));
        assert_eq!(shelf.error(), None);
        assert_eq!(shelf.documents().len(), 2);

        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("3", "c.pdf")]));
        assert_eq!(shelf.documents(), &[doc("3", "c.pdf")]);
    }

    #[test]
    fn failed_fetch_keeps_previous_documents() {
        let mut shelf = loaded(vec![doc("1", "a.pdf")]);
        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(
            ticket,
            Err(ApiError::Server {
                status: 500,
                message: Some("db down".into()),
            }),
        );
        assert_eq!(shelf.documents().len(), 1);
        assert_eq!(shelf.error(), Some(FETCH_FAILED));
    }

    #[test]
    fn stale_fetch_is_ignored() {
        let mut shelf = DocumentShelf::default();
        let older = shelf.begin_fetch();
        let newer = shelf.begin_fetch();

        assert!(shelf.apply_fetch(newer, Ok(vec![doc("1", "a.pdf"), doc("2", "b.pdf")])));
        assert!(!shelf.apply_fetch(older, Ok(vec![])));
        assert_eq!(shelf.documents().len(), 2);
    }

    #[test]
    fn confirmed_delete_removes_only_that_entry() {
        let mut shelf = loaded(vec![doc("1", "a.pdf"), doc("2", "b.pdf"), doc("3", "c.pdf")]);

        shelf.request_delete(DocumentId::new("2"));
        assert_eq!(shelf.pending_delete().map(|d| d.filename.as_str()), Some("b.pdf"));

        let id = shelf.confirm_delete().unwrap();
        assert_eq!(shelf.pending_delete(), None);
        shelf.apply_delete(&id, Ok(()));

        let remaining: Vec<_> = shelf.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(remaining, vec!["1", "3"]);
        assert_eq!(shelf.alert(), None);
    }

    #[test]
    fn cancelled_delete_yields_nothing() {
        let mut shelf = loaded(vec![doc("1", "a.pdf")]);
        shelf.request_delete(DocumentId::new("1"));
        shelf.cancel_delete();
        assert_eq!(shelf.confirm_delete(), None);
        assert_eq!(shelf.documents().len(), 1);
    }

    #[test]
    fn failed_delete_alerts_and_keeps_state() {
        let mut shelf = loaded(vec![doc("1", "a.pdf")]);
        let id = DocumentId::new("1");
        shelf.apply_delete(
            &id,
            Err(ApiError::Server {
                status: 404,
                message: Some("Document not found".into()),
            }),
        );
        assert_eq!(shelf.documents().len(), 1);
        assert_eq!(shelf.alert(), Some("Document not found"));

        shelf.dismiss_alert();
        assert_eq!(shelf.alert(), None);
    }

    #[test]
    fn optimistic_delete_is_overridden_by_next_fetch() {
        let mut shelf = loaded(vec![doc("1", "a.pdf"), doc("2", "b.pdf")]);
        shelf.apply_delete(&DocumentId::new("2"), Ok(()));
        assert_eq!(shelf.documents().len(), 1);

        // Server still lists it; the re-fetch wins.
        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("1", "a.pdf"), doc("2", "b.pdf")]));
        assert_eq!(shelf.documents().len(), 2);
    }

    #[test]
    fn vanished_document_does_not_reopen_its_dialog() {
        let mut shelf = loaded(vec![doc("1", "a.pdf"), doc("2", "b.pdf")]);
        shelf.request_delete(DocumentId::new("2"));

        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("1", "a.pdf")]));
        assert_eq!(shelf.pending_delete(), None);

        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("1", "a.pdf"), doc("2", "b.pdf")]));
        assert_eq!(shelf.pending_delete(), None);
        assert_eq!(shelf.confirm_delete(), None);
    }

    #[test]
    fn pending_dialog_survives_a_fetch_that_still_lists_it() {
        let mut shelf = loaded(vec![doc("1", "a.pdf")]);
        shelf.request_delete(DocumentId::new("1"));

        let ticket = shelf.begin_fetch();
        shelf.apply_fetch(ticket, Ok(vec![doc("1", "a.pdf")]));
        assert_eq!(shelf.pending_delete().map(|d| d.filename.as_str()), Some("a.pdf"));
    }

    #[test]
    fn delete_failure_messages() {
        assert_eq!(
            delete_failure_message(&ApiError::Server {
                status: 500,
                message: None
            }),
            DELETE_FAILED
        );
        assert_eq!(
            delete_failure_message(&ApiError::Transport("error sending request".into())),
            "error sending request"
        );
    }
}
