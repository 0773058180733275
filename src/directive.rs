//! The JSON shape every response to a world command takes.

use serde::{Deserialize, Serialize};

use crate::consts::{INVALID_JSON_MESSAGE, UPSTREAM_FAILURE_MESSAGE};

/// What the world should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ChangeScenery,
    DisplayText,
    Unknown,
    Error,
}

impl Action {
    /// Actions the model is allowed to pick. `Error` is reserved for us.
    pub const MODEL_ACTIONS: &'static [Action] = &[Action::ChangeScenery, Action::DisplayText, Action::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ChangeScenery => "change_scenery",
            Action::DisplayText => "display_text",
            Action::Unknown => "unknown",
            Action::Error => "error",
        }
    }
}

/// A decoded instruction for the world: an action and its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub action: Action,
    pub target: String,
}

impl Directive {
    pub fn new(action: Action, target: impl Into<String>) -> Self {
        Self {
            action,
            target: target.into(),
        }
    }

    /// Returned when the model could not be reached or refused the call.
    pub fn upstream_failure() -> Self {
        Self::new(Action::Error, UPSTREAM_FAILURE_MESSAGE)
    }

    /// Returned when the model reply did not parse as a JSON object.
    pub fn invalid_json() -> Self {
        Self::new(Action::Error, INVALID_JSON_MESSAGE)
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "action": self.action.as_str(),
            "target": self.target,
        })
    }
}
