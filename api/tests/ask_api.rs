//! End-to-end HTTP tests: real router, in-memory store, mocked completion endpoint.

use std::sync::Arc;

use ai_llm_service::{LlmModelConfig, LlmProvider, ModelAdapter, health_service::HealthService};
use api::{AppState, REQUEST_ID_HEADER, router};
use axum::{Json, Router, routing::get, routing::post};
use mcp_pipeline::{McpOrchestrator, PipelineConfig};
use rag_store::InMemoryStore;
use serde_json::{Value, json};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// OpenAI-compatible mock: echoes a fixed completion, or no choices when
/// the prompt mentions "Silence".
async fn spawn_llm() -> String {
    let app = Router::new()
        .route(
            "/v1/completions",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["prompt"].as_str().unwrap_or_default();
                if prompt.contains("Topic: Silence") {
                    Json(json!({"choices": []}))
                } else {
                    Json(json!({"choices": [{"text": "  Check the valve seal.\n"}]}))
                }
            }),
        )
        .route(
            "/v1/models",
            get(|| async { Json(json!({"data": [{"id": "test-model"}]})) }),
        );
    serve(app).await
}

fn llm_cfg(endpoint: String) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "test-model".into(),
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(5),
    }
}

async fn spawn_api(max_inflight: usize) -> (String, Arc<AppState>) {
    let cfg = llm_cfg(spawn_llm().await);
    let store = Arc::new(InMemoryStore::from_texts([
        "ValveDoc: seals wear after 5k cycles.",
        "PumpDoc: prime before start.",
    ]));
    let model = Arc::new(ModelAdapter::new(cfg.clone()).unwrap());
    let orchestrator = McpOrchestrator::new(store, model, PipelineConfig::default());
    let health = HealthService::new(Some(2)).unwrap();
    let state = Arc::new(AppState::new(orchestrator, health, cfg, max_inflight));
    (serve(router(state.clone())).await, state)
}

#[tokio::test]
async fn ask_returns_answer_and_documents() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .json(&json!({"user_name": "Bob", "topic": "valve"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["answer"], "Check the valve seal.");
    assert_eq!(
        body["data"]["documents"],
        json!(["ValveDoc: seals wear after 5k cycles."])
    );
}

#[tokio::test]
async fn pascal_case_payload_is_accepted() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .json(&json!({"UserName": "Alice", "Topic": "Pumps"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn blank_topic_is_rejected() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .json(&json!({"user_name": "Bob", "topic": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_is_enveloped() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .header("content-type", "application/json")
        .body(r#"{"user_name": "Bob"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["error"]["details"][0]["path"], "topic");
}

#[tokio::test]
async fn missing_content_type_is_enveloped() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .body(r#"{"user_name": "Bob", "topic": "Valves"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 415);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert!(body["error"]["details"][0]["hint"].is_string());
}

#[tokio::test]
async fn empty_completion_is_bad_gateway() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .json(&json!({"user_name": "Bob", "topic": "Silence"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "EMPTY_COMPLETION");
}

#[tokio::test]
async fn exhausted_limiter_returns_429() {
    let (base, state) = spawn_api(1).await;
    let _held = state
        .limiter
        .as_ref()
        .unwrap()
        .clone()
        .try_acquire_owned()
        .unwrap();

    let res = reqwest::Client::new()
        .post(format!("{base}/ask"))
        .json(&json!({"user_name": "Bob", "topic": "valve"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
}

#[tokio::test]
async fn health_reports_model() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["model"], "test-model");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (base, _) = spawn_api(4).await;
    let res = reqwest::get(format!("{base}/nope")).await.unwrap();
    assert_eq!(res.status(), 404);
}
