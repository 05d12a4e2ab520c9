// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extraction of the analysis document from a Gemini reply.
//!
//! The reply is two JSON layers deep: the provider envelope carries the
//! model's answer as a string at `candidates[0].content.parts[0].text`, and
//! that string is itself JSON, usually wrapped in a Markdown code fence.
//!
//! Envelope or syntax problems fail the whole extraction. The inner text must
//! start with a JSON value; anything the model writes after that value is
//! ignored. Once the inner JSON parses, missing or odd-shaped fields degrade to absent/empty values
//! and the synthesizer fills in sentinels.

use crate::models::{AnalysisDocument, Improvement, Suggestion};
use serde_json::Value;

/// JSON pointer to the model's text inside the provider envelope.
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Structural failure while locating or parsing the analysis.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Envelope is not valid JSON: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("Envelope has no text at candidates[0].content.parts[0].text")]
    MissingText,

    #[error("Embedded analysis is not valid JSON: {0}")]
    Analysis(#[source] serde_json::Error),
}

/// Parse a raw provider reply into an `AnalysisDocument`.
pub fn extract(raw_response: &str) -> Result<AnalysisDocument, ExtractionError> {
    let envelope: Value = serde_json::from_str(raw_response).map_err(ExtractionError::Envelope)?;

    let text = envelope
        .pointer(TEXT_POINTER)
        .and_then(Value::as_str)
        .ok_or(ExtractionError::MissingText)?;

    let analysis = first_json_value(strip_code_fence(text)).map_err(ExtractionError::Analysis)?;

    Ok(parse_analysis(&analysis))
}

/// Remove a surrounding ```` ```json ```` fence, if any, and trim whitespace.
///
/// Only the leading marker followed by a line break and the trailing line
/// break plus marker are removed; unfenced text passes through trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE_OPEN) {
        if let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            body = rest;
        }
    }

    if let Some(rest) = body.strip_suffix(FENCE_CLOSE) {
        if let Some(rest) = rest.strip_suffix('\n') {
            body = rest.strip_suffix('\r').unwrap_or(rest);
        }
    }

    body.trim()
}

/// Parse the leading JSON value of `body`, ignoring whatever follows it.
fn first_json_value(body: &str) -> Result<Value, serde_json::Error> {
    match serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .next()
    {
        Some(result) => result,
        // Empty input: the plain parser reports the EOF error.
        None => serde_json::from_str(body),
    }
}

/// Map the decoded inner JSON onto the analysis document.
///
/// A non-object value has none of the expected keys and yields an empty
/// document.
fn parse_analysis(root: &Value) -> AnalysisDocument {
    let analysis = root.get("analysis");
    let narrative = |key: &str| {
        analysis
            .and_then(|a| a.get(key))
            .filter(|v| !v.is_null())
            .map(as_text)
    };

    AnalysisDocument {
        overall: narrative("overall"),
        pace: narrative("pace"),
        heart_rate: narrative("heartRate"),
        calories: narrative("caloriesBurned"),
        improvements: array_items(root, "improvements")
            .map(|item| Improvement {
                area: field_text(item, "area"),
                recommendation: field_text(item, "recommendation"),
            })
            .collect(),
        suggestions: array_items(root, "suggestions")
            .map(|item| Suggestion {
                workout: field_text(item, "workout"),
                description: field_text(item, "description"),
            })
            .collect(),
        safety: array_items(root, "safety").map(as_text).collect(),
    }
}

/// Elements of `root[key]` when it is an array; nothing otherwise.
fn array_items<'a>(root: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    root.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn field_text(item: &Value, key: &str) -> String {
    item.get(key).map(as_text).unwrap_or_default()
}

/// Scalar-to-text coercion: strings verbatim, numbers and booleans as
/// JSON text, everything else empty.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
