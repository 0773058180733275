//! Project-wide constants.

/// Default Gemini model when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on a single outbound model call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Body of `GET /`.
pub const GREETING: &str = "AI Director is online and ready.";

/// Target of the error directive when the model call itself fails.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Could not process command with AI.";

/// Target of the error directive when the model reply is not a JSON object.
pub const INVALID_JSON_MESSAGE: &str = "AI response was not valid JSON.";

/// Commands that should always open the world on the default scene.
pub const START_COMMANDS: &[&str] = &["begin", "start", "go"];

/// Scene the model is told to use for [`START_COMMANDS`].
pub const START_SCENERY: &str = "a mountain landscape";
