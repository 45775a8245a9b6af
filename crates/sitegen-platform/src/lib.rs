//! Browser adapters for the sitegen-core ports.

pub mod llm;
pub mod storage;
pub mod clock;
pub mod preview;
pub mod download;
pub mod file_picker;

/// API key baked in at build time via `SITEGEN_API_KEY`, if any.
pub fn build_time_api_key() -> Option<String> {
    option_env!("SITEGEN_API_KEY")
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}
