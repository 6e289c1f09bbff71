use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use race_handicapper::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use race_handicapper::infrastructure::llm::OpenRouterClient;
use race_handicapper::presentation::config::LlmSettings;

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    headers: Arc<Mutex<Option<HeaderMap>>>,
}

async fn spawn_stub(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *captured.body.lock().unwrap() = Some(body);
                        *captured.headers.lock().unwrap() = Some(headers);
                        (status, Json(reply)).into_response()
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn settings(base_url: &str, api_key: Option<&str>) -> LlmSettings {
    serde_json::from_value(json!({
        "api_key": api_key,
        "base_url": base_url,
        "referer": "http://localhost:5000/",
        "app_title": "Horse Racing Analyzer",
        "temperature": 0.7,
        "max_tokens": 4000,
        "request_timeout_secs": 5
    }))
    .unwrap()
}

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

#[tokio::test]
async fn given_successful_reply_when_completing_then_returns_first_choice() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, completion("Top pick: #4")).await;
    let client = OpenRouterClient::new(&settings(&base_url, Some("sk-or-test"))).unwrap();

    let request = CompletionRequest::new("openai/gpt-4o", "Analyze race 3").with_sampling(0.7, 4000);
    let content = client.complete(&request).await.unwrap();

    assert_eq!(content, "Top pick: #4");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "openai/gpt-4o");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "Analyze race 3");
    assert_eq!(body["max_tokens"], 4000);

    let headers = captured.headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers["authorization"], "Bearer sk-or-test");
    assert_eq!(headers["http-referer"], "http://localhost:5000/");
    assert_eq!(headers["x-title"], "Horse Racing Analyzer");
}

#[tokio::test]
async fn given_request_without_sampling_when_completing_then_sampling_fields_are_omitted() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, completion("ok")).await;
    let client = OpenRouterClient::new(&settings(&base_url, Some("sk-or-test"))).unwrap();

    client
        .complete(&CompletionRequest::new("openai/gpt-4o", "hi"))
        .await
        .unwrap();

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert!(body.get("temperature").is_none());
    assert!(body.get("max_tokens").is_none());
}

#[tokio::test]
async fn given_no_api_key_when_completing_then_returns_missing_key_without_calling() {
    let (base_url, captured) = spawn_stub(StatusCode::OK, completion("unused")).await;
    let client = OpenRouterClient::new(&settings(&base_url, None)).unwrap();

    let result = client
        .complete(&CompletionRequest::new("openai/gpt-4o", "hi"))
        .await;

    assert!(matches!(result, Err(LlmClientError::MissingApiKey)));
    assert!(captured.body.lock().unwrap().is_none());
}

#[tokio::test]
async fn given_rate_limit_status_when_completing_then_returns_rate_limited() {
    let (base_url, _captured) =
        spawn_stub(StatusCode::TOO_MANY_REQUESTS, json!({"error": "slow down"})).await;
    let client = OpenRouterClient::new(&settings(&base_url, Some("sk-or-test"))).unwrap();

    let result = client
        .complete(&CompletionRequest::new("openai/gpt-4o", "hi"))
        .await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_completing_then_error_carries_status() {
    let (base_url, _captured) =
        spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;
    let client = OpenRouterClient::new(&settings(&base_url, Some("sk-or-test"))).unwrap();

    let result = client
        .complete(&CompletionRequest::new("openai/gpt-4o", "hi"))
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => assert!(message.contains("500")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_returns_invalid_response() {
    let (base_url, _captured) = spawn_stub(StatusCode::OK, json!({ "choices": [] })).await;
    let client = OpenRouterClient::new(&settings(&base_url, Some("sk-or-test"))).unwrap();

    let result = client
        .complete(&CompletionRequest::new("openai/gpt-4o", "hi"))
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}
