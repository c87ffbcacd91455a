//! Best-effort recovery of a JSON object from free model text.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm_client::LlmError;

/// Parses model output as JSON.
///
/// Tries the text directly (after stripping markdown code fences). If that fails,
/// falls back to the span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    let text = strip_json_fences(text);

    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(direct) => {
            let span = brace_span(text).ok_or(LlmError::NoJson)?;
            serde_json::from_str(span).map_err(|_| LlmError::Parse(direct))
        }
    }
}

/// Like `extract_json`, then deserializes into `T`.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(LlmError::Parse)
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
