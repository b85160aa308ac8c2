//! Turns raw model text into a [`PaletteResult`].
//!
//! Model output is untrusted. It is only ever handed to `serde_json`; there
//! is no evaluation of any kind. Decoding happens in two stages: the text
//! must yield a JSON object, and that object must then pass the shape check.

use crate::models::{ColorRole, PaletteResult};
use serde_json::Value;
use thiserror::Error;

const EXPECTED_ENTRIES: usize = ColorRole::ALL.len();

/// Why a model reply could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFailure {
    /// No JSON object could be decoded from the text.
    #[error("invalid_structure")]
    InvalidStructure { raw: String },

    /// A JSON object was decoded but does not have the palette shape.
    #[error("shape_mismatch: {reason}")]
    ShapeMismatch { reason: String, raw: String },
}

impl ParseFailure {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseFailure::InvalidStructure { .. } => "invalid_structure",
            ParseFailure::ShapeMismatch { .. } => "shape_mismatch",
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            ParseFailure::InvalidStructure { raw } | ParseFailure::ShapeMismatch { raw, .. } => {
                raw
            }
        }
    }
}

/// Decode and shape-check a model reply.
pub fn interpret(raw_text: &str) -> Result<PaletteResult, ParseFailure> {
    let Some(document) = decode_object(raw_text) else {
        return Err(ParseFailure::InvalidStructure {
            raw: raw_text.to_string(),
        });
    };

    let shape_error = |reason: String| ParseFailure::ShapeMismatch {
        reason,
        raw: raw_text.to_string(),
    };

    for role in ColorRole::ALL {
        match document.get(role.key()) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(shape_error(format!("'{}' is not a string", role.key()))),
            None => return Err(shape_error(format!("missing '{}'", role.key()))),
        }
    }

    let palette: PaletteResult =
        serde_json::from_value(document).map_err(|e| shape_error(e.to_string()))?;

    if palette.font_suggestion.trim().is_empty() {
        return Err(shape_error("'fontSuggestion' is empty".to_string()));
    }
    check_len("colorNames", palette.color_names.len()).map_err(shape_error)?;
    check_len("colorNamesDetailed", palette.color_names_detailed.len()).map_err(shape_error)?;
    check_len("colorPsychology", palette.color_psychology.len()).map_err(shape_error)?;

    for role in ColorRole::ALL {
        let value = palette.color(role);
        if !is_hex_color(value) {
            tracing::warn!(role = role.key(), value = %value, "Model returned a non-hex color");
        }
    }

    Ok(palette)
}

fn check_len(field: &str, len: usize) -> Result<(), String> {
    if len == EXPECTED_ENTRIES {
        Ok(())
    } else {
        Err(format!(
            "'{}' has {} entries, expected {}",
            field, len, EXPECTED_ENTRIES
        ))
    }
}

/// Find a JSON object in the text: the whole text first, then a fenced
/// code block, then the first object embedded in surrounding prose.
fn decode_object(raw_text: &str) -> Option<Value> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    [Some(trimmed), fenced_block(trimmed)]
        .into_iter()
        .flatten()
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => Some(value),
            _ => None,
        })
        .or_else(|| embedded_object(trimmed))
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip an info string such as `json`.
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// First complete object starting at some `{`, ignoring whatever follows it.
fn embedded_object(text: &str) -> Option<Value> {
    for (pos, _) in text.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&text[pos..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value @ Value::Object(_))) => return Some(value),
            // The rest of the text is inside an unterminated value, so every
            // later brace is nested in it.
            Some(Err(e)) if e.is_eof() => return None,
            _ => {}
        }
    }
    None
}

/// `#RGB` or `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
