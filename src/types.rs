use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::{
    OffsetDateTime, UtcOffset, format_description::FormatItem, format_description::well_known::Rfc3339,
    macros::format_description,
};

const UPLOADED_AT_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:zero], [year] [hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]"
);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Server-assigned document identifier.
///
/// The backend emits integer keys, but nothing on this side does arithmetic
/// with them, so both JSON numbers and strings are accepted and kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => DocumentId(n.to_string()),
            RawId::Text(s) => DocumentId(s),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub uploaded_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Document {
    pub fn uploaded_label(&self) -> String {
        format_uploaded_at(&self.uploaded_at)
    }
}

/// Renders an RFC 3339 timestamp in local time, or echoes the input when it
/// does not parse.
pub fn format_uploaded_at(raw: &str) -> String {
    let Ok(mut datetime) = OffsetDateTime::parse(raw, &Rfc3339) else {
        return raw.to_string();
    };

    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }

    datetime
        .format(UPLOADED_AT_FORMAT)
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionState {
    Completed,
    Processing,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IngestionStatus {
    pub status: IngestionState,
    #[serde(default)]
    pub chunks_processed: u32,
}

impl IngestionStatus {
    pub fn is_completed(&self) -> bool {
        self.status == IngestionState::Completed
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UploadAccepted {
    pub document_id: DocumentId,
    #[serde(default)]
    pub message: Option<String>,
}
