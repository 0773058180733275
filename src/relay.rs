//! The command pipeline: prompt, one model call, sanitize, decode.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::decode::{Decoded, decode};
use crate::directive::Directive;
use crate::model::Model;
use crate::prompts::director::{build_director_prompt, is_start_command};
use crate::sanitize::sanitize;

/// How a single command ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The model answered with a JSON object. Passed through unvalidated.
    Decoded(Value),
    /// The model call failed. Carries the error text for logs and tests.
    UpstreamFailure(String),
    /// The model answered, but not with a JSON object. Carries the sanitized reply.
    InvalidJson(String),
}

impl Outcome {
    /// The response body. Failures collapse to their error directive.
    pub fn into_body(self) -> Value {
        match self {
            Outcome::Decoded(value) => value,
            Outcome::UpstreamFailure(_) => Directive::upstream_failure().to_value(),
            Outcome::InvalidJson(_) => Directive::invalid_json().to_value(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Decoded(_))
    }
}

/// Turns world commands into directives. Stateless; share it freely.
#[derive(Clone)]
pub struct Director {
    model: Arc<dyn Model>,
}

impl Director {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Run one command through the pipeline. Never fails: every error is
    /// folded into the returned [`Outcome`].
    pub async fn process(&self, text: &str) -> Outcome {
        info!(command = %text, "received command");
        if is_start_command(text) {
            debug!("start command, special rule applies");
        }

        let prompt = build_director_prompt(text);

        let completion = match self.model.generate(&prompt).await {
            Ok(completion) => completion,
            Err(e) => {
                let message = format!("{e:#}");
                warn!(error = %message, "model call failed");
                return Outcome::UpstreamFailure(message);
            }
        };

        if let Some(usage) = completion.usage {
            debug!(
                input = usage.input_tokens,
                output = usage.output_tokens,
                "token usage"
            );
        }

        let cleaned = sanitize(&completion.text);
        info!(response = %cleaned, "model response received");

        match decode(&cleaned) {
            Decoded::Value(map) => Outcome::Decoded(Value::Object(map)),
            Decoded::Fallback { reason } => {
                warn!(%reason, "model did not return valid JSON");
                Outcome::InvalidJson(cleaned)
            }
        }
    }
}
