//! Runtime configuration for the relay.
//!
//! Built once at startup (from CLI flags and environment, see `main.rs`)
//! and handed to the model client and server. Nothing here is global.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::consts::{DEFAULT_API_BASE, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

/// Everything needed to reach the model and serve requests.
#[derive(Clone)]
pub struct Config {
    /// Credential for the generative-language API.
    pub api_key: String,
    pub model: String,
    /// Scheme and host of the API, without a trailing slash.
    pub api_base: String,
    /// Bound on a single outbound model call.
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Defaults for everything except the credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Reject settings that would make every request fail or hang.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("no API key configured. Pass --api-key or set GEMINI_API_KEY.");
        }
        if self.model.trim().is_empty() {
            bail!("model name must not be empty");
        }
        if self.timeout.is_zero() {
            bail!("timeout must be greater than zero");
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            bail!("api base must be an http(s) URL, got {}", self.api_base);
        }
        Ok(())
    }

    /// The socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// With an explicit path the file must exist. Without one, `.env` is
/// looked up from the working directory and a missing file is not an
/// error. Variables already set are never overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e).context("failed to load .env"),
        },
    }
}
