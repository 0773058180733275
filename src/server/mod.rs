//! HTTP surface: a greeting and the command endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::consts::GREETING;
use crate::relay::Director;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub director: Arc<Director>,
}

/// Body of `POST /process-command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

pub fn router(director: Arc<Director>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/process-command", post(process_command))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { director })
}

/// Bind and serve until the process is stopped.
pub async fn serve(listener: TcpListener, director: Arc<Director>) -> Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router(director))
        .await
        .context("server error")?;
    Ok(())
}

async fn root() -> Json<Greeting> {
    Json(Greeting {
        message: GREETING.to_string(),
    })
}

/// Always 200. Model failures come back as an error directive.
async fn process_command(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Json<Value> {
    Json(state.director.process(&req.text).await.into_body())
}
