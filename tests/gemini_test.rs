use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use director::config::Config;
use director::model::Model;
use director::model::gemini::GeminiModel;
use director::relay::{Director, Outcome};

const MODEL_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Serve `app` on an ephemeral local port and return a config pointing at it.
async fn stub(app: Router) -> Config {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let mut config = Config::new("test-key");
    config.api_base = format!("http://{}", addr);
    config.timeout = Duration::from_secs(5);
    config
}

fn reply(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 100, "candidatesTokenCount": 20}
    })
}

#[tokio::test]
async fn sends_prompt_and_key() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let key = headers
                .get("x-goog-api-key")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or("")
                .to_string();
            Json(reply(&format!("{key}|{prompt}")))
        }),
    );
    let config = stub(app).await;
    let model = GeminiModel::new(&config).unwrap();

    let completion = model.generate("hello world").await.unwrap();

    assert_eq!(completion.text, "test-key|hello world");
    let usage = completion.usage.unwrap();
    assert_eq!(usage.input_tokens, 100);
    assert_eq!(usage.output_tokens, 20);
}

#[tokio::test]
async fn auth_failure_is_error() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
            )
        }),
    );
    let config = stub(app).await;
    let model = GeminiModel::new(&config).unwrap();

    let err = model.generate("x").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("403"), "{msg}");
    assert!(msg.contains("API key not valid"), "{msg}");
}

#[tokio::test]
async fn quota_failure_is_error() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let config = stub(app).await;
    let model = GeminiModel::new(&config).unwrap();

    assert!(model.generate("x").await.is_err());
}

#[tokio::test]
async fn malformed_body_is_error() {
    let app = Router::new().route(MODEL_PATH, post(|| async { "not json" }));
    let config = stub(app).await;
    let model = GeminiModel::new(&config).unwrap();

    assert!(model.generate("x").await.is_err());
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(reply("{}"))
        }),
    );
    let mut config = stub(app).await;
    config.timeout = Duration::from_millis(200);
    let model = GeminiModel::new(&config).unwrap();

    let started = std::time::Instant::now();
    let result = model.generate("x").await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn unreachable_host_is_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::new("k");
    config.api_base = format!("http://{}", addr);
    let model = GeminiModel::new(&config).unwrap();

    assert!(model.generate("x").await.is_err());
}

#[tokio::test]
async fn director_end_to_end() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|| async {
            Json(reply(
                "```json\n{\"action\": \"change_scenery\", \"target\": \"a mountain landscape\"}\n```",
            ))
        }),
    );
    let config = stub(app).await;
    let director = Director::new(Arc::new(GeminiModel::new(&config).unwrap()));

    let outcome = director.process("start").await;

    assert_eq!(
        outcome,
        Outcome::Decoded(json!({"action": "change_scenery", "target": "a mountain landscape"}))
    );
}

#[tokio::test]
async fn director_maps_http_failure() {
    let app = Router::new().route(
        MODEL_PATH,
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let config = stub(app).await;
    let director = Director::new(Arc::new(GeminiModel::new(&config).unwrap()));

    let body = director.process("begin").await.into_body();

    assert_eq!(
        body,
        json!({"action": "error", "target": "Could not process command with AI."})
    );
}
