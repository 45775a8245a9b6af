use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SitegenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nothing to send: provide a message or at least one attachment")]
    EmptyMessage,

    #[error("Model error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Model { status: Option<u16>, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to get response. Details: {0}")]
    Request(Box<SitegenError>),

    #[error(
        "Rate limit exceeded after {attempts} attempts. Please wait 2-3 minutes and try again, \
         or create a new API key."
    )]
    RetriesExhausted { attempts: u32 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl SitegenError {
    /// Whether the endpoint rejected the request for quota reasons.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            SitegenError::Model { status, message } => {
                *status == Some(429)
                    || message.contains("RESOURCE_EXHAUSTED")
                    || message.contains("Quota exceeded")
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for SitegenError {
    fn from(e: serde_json::Error) -> Self {
        SitegenError::Serialization(e.to_string())
    }
}
