//! Extract a `GeneratedCode` bundle from free-text model output.
//!
//! A reply that does not contain a valid bundle is a conversational answer,
//! not an error, so this module never fails.

use serde_json::Value;
use sitegen_types::GeneratedCode;

/// Parse a model reply into a bundle, or `None` for prose.
///
/// Fenced blocks are tried in order of appearance. Only when the text has no
/// fenced block at all is the widest `{ ... }` span tried instead.
pub fn parse_code_response(text: &str) -> Option<GeneratedCode> {
    let fenced = fenced_json_blocks(text);

    if fenced.is_empty() {
        widest_braces(text).and_then(bundle_from_json)
    } else {
        fenced.iter().find_map(|block| bundle_from_json(block))
    }
}

/// Bodies of ```` ``` ```` and ```` ```json ```` blocks, in order.
/// Blocks tagged with another language are skipped.
fn fenced_json_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut open: Option<(bool, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        match open.take() {
            None => {
                if let Some(info) = trimmed.strip_prefix("```") {
                    let info = info.trim();
                    let is_json = info.is_empty() || info.eq_ignore_ascii_case("json");
                    open = Some((is_json, Vec::new()));
                }
            }
            Some((is_json, body)) if trimmed == "```" => {
                if is_json {
                    blocks.push(body.join("\n"));
                }
            }
            Some((is_json, mut body)) => {
                body.push(line);
                open = Some((is_json, body));
            }
        }
    }
    blocks
}

/// Substring from the first `{` to the last `}`.
fn widest_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn bundle_from_json(candidate: &str) -> Option<GeneratedCode> {
    let value: Value = match serde_json::from_str(candidate.trim()) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Model reply is not a JSON bundle: {}", e);
            return None;
        }
    };

    let Value::Object(map) = value else {
        log::warn!("Model reply JSON is not an object");
        return None;
    };
    if map.is_empty() {
        log::warn!("Model reply JSON object is empty");
        return None;
    }

    let mut code = GeneratedCode::new();
    for (path, content) in map {
        match content {
            Value::String(s) => code.insert(path, s),
            other => {
                log::warn!("Bundle entry {} is not a string ({})", path, kind_of(&other));
                return None;
            }
        }
    }
    Some(code)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
