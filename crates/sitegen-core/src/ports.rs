//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `sitegen-core` (pure Rust).
//! Implementations live in `sitegen-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use sitegen_types::{
    GeneratedCode, Result,
    message::{ChatFile, ChatRole},
};

// ─── Model Port ──────────────────────────────────────────────

/// One part of a conversation turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPart {
    Text(String),
    /// Binary attachment, base64 encoded
    InlineData { mime_type: String, data: String },
}

/// One turn of the conversation as the endpoint sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTurn {
    pub role: ChatRole,
    pub parts: Vec<TurnPart>,
}

impl ModelTurn {
    /// A user turn: the text first, then one inline part per attachment.
    pub fn user(text: &str, files: &[ChatFile]) -> Self {
        let mut parts = vec![TurnPart::Text(text.to_string())];
        parts.extend(files.iter().map(|f| TurnPart::InlineData {
            mime_type: f.mime_type.clone(),
            data: f.data.clone(),
        }));
        Self { role: ChatRole::User, parts }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            parts: vec![TurnPart::Text(text.into())],
        }
    }
}

/// Request to send to the model endpoint.
/// `contents` holds every previous turn followed by the new user turn.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub api_key: String,
    pub system_instruction: String,
    pub contents: Vec<ModelTurn>,
}

#[async_trait(?Send)]
pub trait ModelPort {
    /// Send the conversation and return the reply text.
    async fn generate(&self, req: &GenerateRequest) -> Result<String>;
}

// ─── Clock Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ClockPort {
    /// Milliseconds since an arbitrary fixed epoch
    fn now_ms(&self) -> u64;

    /// Suspend without blocking the event loop
    async fn sleep_ms(&self, ms: u64);
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Credential Port ─────────────────────────────────────────

#[async_trait(?Send)]
pub trait CredentialSource {
    /// Resolve the API credential, or a configuration error if none exists.
    async fn resolve(&self) -> Result<String>;
}

// ─── Archive Port ────────────────────────────────────────────

pub trait ArchivePort {
    /// Pack every file of the bundle into one archive.
    fn build_archive(&self, code: &GeneratedCode) -> Result<Vec<u8>>;

    /// MIME type of the produced archive
    fn mime_type(&self) -> &str;
}
