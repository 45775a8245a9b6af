//! Gemini `generateContent` adapter.
//!
//! One non-streaming REST call per turn. The full conversation is sent every
//! time; the endpoint itself is stateless.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use sitegen_core::ports::*;
use sitegen_types::{Result, SitegenError};

pub struct GeminiProvider {
    api_base: String,
}

impl GeminiProvider {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait(?Send)]
impl ModelPort for GeminiProvider {
    async fn generate(&self, req: &GenerateRequest) -> Result<String> {
        let url = self.endpoint(&req.model);
        let body = request_body(req);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &req.api_key)
            .json(&body)
            .map_err(|e| SitegenError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SitegenError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SitegenError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(parse_error(status, &text));
        }
        parse_reply(&text)
    }
}

/// JSON body for `generateContent`.
pub fn request_body(req: &GenerateRequest) -> Value {
    let contents: Vec<Value> = req.contents.iter().map(turn_to_json).collect();
    json!({
        "systemInstruction": { "parts": [{ "text": req.system_instruction }] },
        "contents": contents,
    })
}

fn turn_to_json(turn: &ModelTurn) -> Value {
    let parts: Vec<Value> = turn
        .parts
        .iter()
        .map(|part| match part {
            TurnPart::Text(text) => json!({ "text": text }),
            TurnPart::InlineData { mime_type, data } => json!({
                "inlineData": { "mimeType": mime_type, "data": data }
            }),
        })
        .collect();
    json!({ "role": turn.role.as_str(), "parts": parts })
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    content: Option<ApiContent>,
}

#[derive(Deserialize)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Deserialize)]
struct ApiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<u16>,
    #[serde(default)]
    message: String,
    status: Option<String>,
}

/// Concatenated text parts of the first candidate.
pub fn parse_reply(body: &str) -> Result<String> {
    let data: ApiResponse = serde_json::from_str(body)?;

    let Some(candidate) = data.candidates.into_iter().next() else {
        let reason = data
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("Prompt blocked: {}", r))
            .unwrap_or_else(|| "No candidates in response".to_string());
        return Err(SitegenError::Model { status: None, message: reason });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    Ok(text)
}

/// Map a non-2xx reply to `SitegenError::Model`.
///
/// The symbolic status (e.g. `RESOURCE_EXHAUSTED`) is kept in the message so
/// rate-limit detection works on either field.
pub fn parse_error(http_status: u16, body: &str) -> SitegenError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(ApiErrorEnvelope { error }) => {
            let message = match error.status {
                Some(status) => format!("{}: {}", status, error.message),
                None => error.message,
            };
            SitegenError::Model {
                status: Some(error.code.unwrap_or(http_status)),
                message,
            }
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                format!("HTTP {}", http_status)
            } else {
                body.trim().to_string()
            };
            SitegenError::Model {
                status: Some(http_status),
                message,
            }
        }
    }
}
