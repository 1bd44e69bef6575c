//! The per-format content decoder boundary.
//!
//! The engine only depends on the [`ContentDecoder`] trait; the bundled
//! [`DefaultDecoder`] handles the common formats (YAML front matter + body,
//! whole-file YAML, whole-file JSON) by file extension.

use crate::content::ParsedContent;
use crate::entry::RawFileItem;
use serde_json::{Map, Value};
use thiserror::Error;

/// A recoverable per-file decode failure. Collected into
/// [`crate::entry::BatchResult::errors`]; never aborts a batch.
#[derive(Debug, Clone, Error)]
#[error("failed to decode {path}: {reason}")]
pub struct DecodeError {
    /// Repository-relative path of the offending file.
    pub path: String,

    /// Human-readable cause.
    pub reason: String,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Turns one raw file into a structured value. Implementations must not
/// panic on malformed input; failures are reported per file.
pub trait ContentDecoder {
    fn decode(&self, file: &RawFileItem) -> Result<ParsedContent, DecodeError>;
}

/// Extension-dispatched decoder for Markdown front matter, YAML, and JSON.
#[derive(Debug, Clone)]
pub struct DefaultDecoder {
    /// Content key the Markdown body is stored under.
    body_key: String,
}

impl Default for DefaultDecoder {
    fn default() -> Self {
        Self {
            body_key: "body".to_string(),
        }
    }
}

impl DefaultDecoder {
    /// Use a different content key for the Markdown body.
    pub fn with_body_key(mut self, key: impl Into<String>) -> Self {
        self.body_key = key.into();
        self
    }

    fn decode_front_matter(&self, file: &RawFileItem) -> Result<ParsedContent, DecodeError> {
        let (front_matter, body) = match split_front_matter(&file.text) {
            Some(parts) => parts,
            // No fences: the whole file is body text.
            None => ("", file.text.as_str()),
        };

        let mut map = if front_matter.trim().is_empty() {
            Map::new()
        } else {
            let yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(front_matter)
                .map_err(|e| DecodeError::new(&file.path, e))?;
            let value =
                serde_json::to_value(yaml).map_err(|e| DecodeError::new(&file.path, e))?;
            match value {
                Value::Object(map) => map,
                other => {
                    return Err(DecodeError::new(
                        &file.path,
                        format!("front matter must be a mapping, got {}", json_type_name(&other)),
                    ))
                }
            }
        };

        map.insert(self.body_key.clone(), Value::String(body.to_string()));
        Ok(Value::Object(map))
    }

    fn decode_yaml(&self, file: &RawFileItem) -> Result<ParsedContent, DecodeError> {
        let yaml: serde_yaml_ng::Value =
            serde_yaml_ng::from_str(&file.text).map_err(|e| DecodeError::new(&file.path, e))?;
        serde_json::to_value(yaml).map_err(|e| DecodeError::new(&file.path, e))
    }
}

impl ContentDecoder for DefaultDecoder {
    fn decode(&self, file: &RawFileItem) -> Result<ParsedContent, DecodeError> {
        match file.path.rsplit('.').next().unwrap_or_default() {
            "json" => serde_json::from_str(&file.text).map_err(|e| DecodeError::new(&file.path, e)),
            "yml" | "yaml" => self.decode_yaml(file),
            _ => self.decode_front_matter(file),
        }
    }
}

/// Split text into `(front matter, body)` when it opens with a `---` fence.
/// Returns `None` when there is no opening fence; a missing closing fence
/// yields an empty body with everything after the opening fence as front
/// matter, which then fails YAML parsing with a useful message.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))?;

    if let Some(end) = rest.find("\n---\n") {
        return Some((&rest[..end], &rest[end + 5..]));
    }

    if let Some(front_matter) = rest.strip_suffix("\n---") {
        return Some((front_matter, ""));
    }

    Some((rest, ""))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
