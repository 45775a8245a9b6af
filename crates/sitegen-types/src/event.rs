use serde::{Deserialize, Serialize};
use crate::bundle::GeneratedCode;
use crate::message::ChatMessage;

/// Events emitted by the workspace runtime and the generation client.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// A user submission started processing
    TurnStart { turn_id: u64 },

    /// A message was appended to the transcript
    MessageAppended { message: ChatMessage },

    /// Dispatch is held back by the request spacing
    Throttled { wait_ms: u64 },

    /// The endpoint rate-limited us; waiting before the next attempt
    Retrying { attempt: u32, max_attempts: u32, delay_ms: u64 },

    /// A new bundle replaced the previous one
    BundleReady { code: GeneratedCode },

    /// The submission finished (successfully or not)
    TurnEnd { turn_id: u64 },

    /// An error occurred
    Error { message: String },
}
