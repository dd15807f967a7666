//! Structured commit message record and response validation.
//!
//! The drafting model is constrained to a single-field JSON object via
//! Ollama's `format` parameter. The response is still untrusted text: it
//! must parse as JSON and satisfy the length bounds before the message
//! string is extracted.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::GenerationError;

/// Maximum commit message length in characters (git subject-line convention).
pub const MAX_MESSAGE_CHARS: usize = 72;

/// A structured commit message response from the drafting model.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitMessage {
    /// Conventional-commit message, 1-72 characters.
    pub message: String,
}

impl CommitMessage {
    /// Check the length bounds on the raw (untrimmed) message.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let chars = self.message.chars().count();
        if chars == 0 {
            return Err(GenerationError::Validation(
                "message is empty".to_string(),
            ));
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(GenerationError::Validation(format!(
                "message is {chars} characters, maximum is {MAX_MESSAGE_CHARS}"
            )));
        }
        Ok(())
    }
}

/// JSON schema sent as Ollama's `format` parameter when drafting.
///
/// Exactly one required field: `message`, a string of length 1-72.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "message": {
                "type": "string",
                "description": "A conventional commit message starting with a type (feat, fix, etc.) followed by a description",
                "minLength": 1,
                "maxLength": MAX_MESSAGE_CHARS,
            }
        },
        "required": ["message"],
    })
}

/// Parse and validate a drafting response, returning the trimmed message.
///
/// Rejects malformed JSON, a missing or non-string `message` field, and
/// out-of-bounds length. Length is checked before trimming, mirroring
/// schema validation on the raw field value.
pub fn parse_response(raw: &str) -> Result<String, GenerationError> {
    let record: CommitMessage = serde_json::from_str(raw)
        .map_err(|e| GenerationError::InvalidJson(e.to_string()))?;

    record.validate()?;

    Ok(record.message.trim().to_string())
}
