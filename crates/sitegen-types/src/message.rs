use base64::prelude::*;
use serde::{Deserialize, Serialize};

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// Name and MIME type of a file the user attached.
/// The payload is never kept in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub name: String,
    pub mime_type: String,
}

/// A single entry in the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<AttachmentMeta>,
    /// Set on model messages that carried a generated bundle
    #[serde(default)]
    pub is_code: bool,
    pub created_at: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, files: &[ChatFile]) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            attachments: files.iter().map(ChatFile::meta).collect(),
            is_code: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            attachments: Vec::new(),
            is_code: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn model_code(text: impl Into<String>) -> Self {
        Self {
            is_code: true,
            ..Self::model(text)
        }
    }
}

/// A user-selected file ready for transmission.
/// Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFile {
    pub name: String,
    pub mime_type: String,
    /// base64 (standard alphabet, padded)
    pub data: String,
}

impl ChatFile {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: BASE64_STANDARD.encode(bytes),
        }
    }

    pub fn meta(&self) -> AttachmentMeta {
        AttachmentMeta {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}
