//! Parses sanitized model output into the response body.

use serde_json::{Map, Value};

use crate::directive::Directive;

/// The two ways decoding can end.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The text was a JSON object. Passed through as-is, unvalidated.
    Value(Map<String, Value>),
    /// The text was not JSON, or was JSON but not an object.
    Fallback { reason: String },
}

impl Decoded {
    /// The body to send back: the object itself, or the invalid-JSON directive.
    pub fn into_value(self) -> Value {
        match self {
            Decoded::Value(map) => Value::Object(map),
            Decoded::Fallback { .. } => Directive::invalid_json().to_value(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decoded::Fallback { .. })
    }
}

/// Decode sanitized text. Never fails: bad input becomes [`Decoded::Fallback`].
///
/// Objects missing `action` or `target` are not rejected.
pub fn decode(sanitized: &str) -> Decoded {
    match serde_json::from_str::<Value>(sanitized) {
        Ok(Value::Object(map)) => Decoded::Value(map),
        Ok(other) => Decoded::Fallback {
            reason: format!("expected a JSON object, got {}", kind(&other)),
        },
        Err(e) => Decoded::Fallback {
            reason: e.to_string(),
        },
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
