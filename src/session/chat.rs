use crate::api::{ApiError, ApiResult};
use crate::types::ChatMessage;

const REPLY_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";
const NETWORK_FALLBACK: &str = "Network error. Please check your connection.";

/// Append-only transcript with at most one query in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    pending: bool,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Echoes `text` into the transcript and returns the query to send.
    /// `None` for blank input or while a previous query is outstanding.
    pub fn begin(&mut self, text: &str) -> Option<String> {
        let question = text.trim();
        if question.is_empty() || self.pending {
            return None;
        }
        self.transcript.push(ChatMessage::user(question));
        self.pending = true;
        Some(question.to_string())
    }

    pub fn resolve(&mut self, outcome: ApiResult<String>) {
        self.transcript.push(ChatMessage::assistant(reply_text(outcome)));
        self.pending = false;
    }
}

pub fn reply_text(outcome: ApiResult<String>) -> String {
    match outcome {
        Ok(answer) => answer,
        Err(err @ ApiError::Server { .. }) => {
            tracing::error!("query rejected: {err}");
            err.server_message().unwrap_or(REPLY_FALLBACK).to_string()
        }
        Err(err) => {
            tracing::error!("query failed: {err}");
            NETWORK_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn blank_input_is_a_no_op() {
        let mut chat = ChatSession::default();
        assert_eq!(chat.begin("   \n\t"), None);
        assert!(chat.messages().is_empty());
        assert!(!chat.is_pending());
    }

    #[test]
    fn user_message_is_echoed_before_the_reply() {
        let mut chat = ChatSession::default();
        let query = chat.begin("  what is this about? ").unwrap();
        assert_eq!(query, "what is this about?");
        assert_eq!(chat.messages(), &[ChatMessage::user("what is this about?")]);
        assert!(chat.is_pending());
    }

    #[test]
    fn second_message_while_pending_is_refused() {
        let mut chat = ChatSession::default();
        assert!(chat.begin("first").is_some());
        assert_eq!(chat.begin("second"), None);
        assert_eq!(chat.messages().len(), 1);

        chat.resolve(Ok("answer".into()));
        assert!(chat.begin("second").is_some());
    }

    #[test]
    fn server_error_is_shown_verbatim() {
        let mut chat = ChatSession::default();
        chat.begin("q");
        chat.resolve(Err(ApiError::Server {
            status: 400,
            message: Some("Query is required".into()),
        }));
        assert_eq!(chat.messages()[1], ChatMessage::assistant("Query is required"));
        assert!(!chat.is_pending());
    }

    #[test]
    fn server_error_without_message_uses_fallback() {
        let mut chat = ChatSession::default();
        chat.begin("q");
        chat.resolve(Err(ApiError::Server {
            status: 500,
            message: None,
        }));
        assert_eq!(chat.messages()[1].content, REPLY_FALLBACK);
    }

    #[test]
    fn transport_failure_appends_one_fallback_message() {
        let mut chat = ChatSession::default();
        chat.begin("q");
        chat.resolve(Err(ApiError::Transport("connection refused".into())));

        let replies: Vec<_> = chat
            .messages()
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .collect();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content, NETWORK_FALLBACK);
        assert!(!chat.is_pending());
    }

    #[test]
    fn unreadable_answer_counts_as_network_error() {
        assert_eq!(
            reply_text(Err(ApiError::Decode("missing field `answer`".into()))),
            NETWORK_FALLBACK
        );
    }
}
