use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use director::config::{Config, load_env_file};
use director::consts::{DEFAULT_API_BASE, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use director::model::gemini::GeminiModel;
use director::relay::Director;
use director::server;

#[derive(Parser)]
#[command(name = "director", version, about = "Turns world commands into JSON directives.")]
struct Cli {
    /// Generative Language API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model name
    #[arg(long, env = "DIRECTOR_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// API base URL
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Model call timeout in seconds
    #[arg(short, long, env = "DIRECTOR_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Address to listen on
    #[arg(long, env = "DIRECTOR_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Load environment from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Process a single command, print the result, and exit
    #[arg(short, long)]
    run: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The env file has to be in place before clap reads env fallbacks.
    let env_file = env_file_arg();
    let loaded = load_env_file(env_file.as_deref())?;

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    if let Some(path) = loaded {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let config = Config {
        api_key: cli.api_key.unwrap_or_default(),
        model: cli.model,
        api_base: cli.api_base,
        timeout: Duration::from_secs(cli.timeout),
        host: cli.host,
        port: cli.port,
    };
    config.validate()?;
    tracing::info!(model = %config.model, timeout = ?config.timeout, "configured");

    let model = GeminiModel::new(&config)?;
    let director = Arc::new(Director::new(Arc::new(model)));

    // Single command mode
    if let Some(text) = cli.run {
        let body = director.process(&text).await.into_body();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    server::serve(listener, director).await
}

/// Pull `--env-file` out of argv ahead of the full parse.
fn env_file_arg() -> Option<PathBuf> {
    let mut args = std::env::args_os().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--env-file" {
            return args.next().map(PathBuf::from);
        }
        if let Some(value) = arg.to_str().and_then(|a| a.strip_prefix("--env-file=")) {
            return Some(PathBuf::from(value));
        }
    }
    None
}
