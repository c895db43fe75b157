//! End-to-end requests through the router against an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use momento_assistant::content::Content;
use momento_assistant::provider::{ChatProvider, ModelRequest};
use momento_assistant::{Assistant, AssistantError};
use momento_db::service::MomentoService;
use momento_server::{AppState, router};

/// Answers every model call with the same text.
struct FixedReply(&'static str);

#[async_trait]
impl ChatProvider for FixedReply {
    async fn generate(&self, _request: ModelRequest<'_>) -> Result<Content, AssistantError> {
        Ok(Content::model_text(self.0))
    }
}

async fn state() -> AppState {
    let service = MomentoService::new_local(":memory:").await.unwrap();
    AppState::new(Arc::new(service))
}

async fn app() -> Router {
    router(state().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn task_crud_round_trip() {
    let app = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "Write report", "task_date": "2025-03-04", "start_time": "9am"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["start_time"], "09:00");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Write report");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{id}"),
        Some(json!({"status": "completed", "title": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["title"], "Write report");

    let (status, list) = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"]["original_task_id"], id);

    let (status, body) = send(&app, Method::GET, &format!("/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Task not found: {id}"));
}

#[tokio::test]
async fn store_failures_report_the_store_message() {
    let service = Arc::new(MomentoService::new_local(":memory:").await.unwrap());
    service
        .db()
        .conn()
        .execute("DROP TABLE notes", ())
        .await
        .unwrap();
    let app = router(AppState::new(service));

    let (status, body) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("no such table: notes"), "{message}");
}

#[tokio::test]
async fn validation_failures_are_bad_requests() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/tasks", Some(json!({"description": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({"title": "t", "start_time": "10:00", "end_time": "09:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "End time must be after start time");

    let (status, body) = send(&app, Method::GET, "/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_uses_error_body() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn task_logs_are_scoped_to_their_task() {
    let app = app().await;
    let (_, first) = send(&app, Method::POST, "/tasks", Some(json!({"title": "a"}))).await;
    let (_, second) = send(&app, Method::POST, "/tasks", Some(json!({"title": "b"}))).await;
    let first = first["id"].as_i64().unwrap();
    let second = second["id"].as_i64().unwrap();

    let (status, log) = send(
        &app,
        Method::POST,
        &format!("/tasks/{first}/logs"),
        Some(json!({"content": "  drafted intro  "})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["content"], "drafted intro");
    let log_id = log["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{second}/logs/{log_id}"),
        Some(json!({"content": "moved"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Log entry not found: {log_id}"));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/tasks/{first}/logs/{log_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, logs) = send(&app, Method::GET, &format!("/tasks/{first}/logs"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logs, json!([]));

    let (status, _) = send(&app, Method::GET, "/tasks/999/logs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_and_activity_feed() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/notes", Some(json!({"title": "only"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title and content are required");

    let (status, note) = send(
        &app,
        Method::POST,
        "/notes",
        Some(json!({"title": "Groceries", "content": "milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = note["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/notes/{id}"),
        Some(json!({"content": "milk, eggs"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Groceries");
    assert_eq!(updated["content"], "milk, eggs");

    let (status, feed) = send(&app, Method::GET, "/activity-log?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["description"], "Updated note: \"Groceries\"");

    let (status, body) = send(&app, Method::GET, "/activity-log?startDate=someday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid startDate: someday");
}

#[tokio::test]
async fn trash_lists_deleted_tasks_with_logs() {
    let app = app().await;
    let (_, task) = send(&app, Method::POST, "/tasks", Some(json!({"title": "old"}))).await;
    let id = task["id"].as_i64().unwrap();
    send(
        &app,
        Method::POST,
        &format!("/tasks/{id}/logs"),
        Some(json!({"content": "note"})),
    )
    .await;
    send(&app, Method::DELETE, &format!("/tasks/{id}"), None).await;

    let (status, trash) = send(&app, Method::GET, "/trash", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(trash[0]["title"], "old");
    assert_eq!(trash[0]["logs"][0]["content"], "note");
}

#[tokio::test]
async fn momento_start_log_finish() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/momento/finish", Some(json!({"identifier": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No active momento tasks found to finish.");

    let (status, started) = send(
        &app,
        Method::POST,
        "/momento/start",
        Some(json!({"title": "Deep work"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(started["task"]["description"], "Started working on: Deep work");
    let id = started["task"]["id"].as_i64().unwrap();

    let (status, placed) = send(
        &app,
        Method::POST,
        "/momento/log",
        Some(json!({"content": "halfway"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["auto_routed"], true);
    assert_eq!(placed["task"]["id"], id);

    let (_, active) = send(&app, Method::GET, "/momento/active", None).await;
    assert_eq!(active[0]["id"], id);

    let (status, finished) = send(
        &app,
        Method::POST,
        "/momento/finish",
        Some(json!({"identifier": id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["task"]["status"], "completed");

    let (_, active) = send(&app, Method::GET, "/momento/active", None).await;
    assert_eq!(active, json!([]));
}

#[tokio::test]
async fn ambiguous_finish_is_a_conflict() {
    let app = app().await;
    for title in ["Review PR one", "Review PR two"] {
        send(&app, Method::POST, "/momento/start", Some(json!({"title": title}))).await;
    }
    let (status, body) = send(
        &app,
        Method::POST,
        "/momento/finish",
        Some(json!({"identifier": "review"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Multiple active momento tasks"));
}

#[tokio::test]
async fn assistant_routes_need_a_provider() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/assistant/chat",
        Some(json!({"history": [{"role": "user", "parts": [{"text": "hi"}]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn assistant_chat_and_parse() {
    let state = state()
        .await
        .with_assistant(Assistant::new(Arc::new(FixedReply("All done."))));
    let app = router(state);

    let (status, reply) = send(
        &app,
        Method::POST,
        "/assistant/chat",
        Some(json!({"history": [{"role": "user", "parts": [{"text": "hi"}]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["reply"], "All done.");
    assert_eq!(reply["exhausted"], false);

    let (status, _) = send(&app, Method::POST, "/assistant/chat", Some(json!({"history": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/assistant/parse-task", Some(json!({"text": " "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No text provided");

    let (status, _) = send(
        &app,
        Method::POST,
        "/assistant/parse-task",
        Some(json!({"text": "lunch tomorrow"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

const BOUNDARY: &str = "momento-test-boundary";

/// A multipart body with one file field.
fn multipart_body(field: &str, mime_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"clip\"\r\n\
         Content-Type: {mime_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn send_form(app: &Router, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn audio_note_drafts_a_note_from_the_recording() {
    let reply = r#"{"title": "Weekly plan", "content": "Finish the report and call the bank."}"#;
    let state = state()
        .await
        .with_assistant(Assistant::new(Arc::new(FixedReply(reply))));
    let app = router(state);

    let (status, note) = send_form(
        &app,
        "/assistant/audio-note",
        multipart_body("audio", "audio/webm", b"recorded"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        note,
        json!({"title": "Weekly plan", "content": "Finish the report and call the bank."})
    );

    let (_, notes) = send(&app, Method::GET, "/notes", None).await;
    assert_eq!(notes, json!([]));

    let (status, body) = send_form(
        &app,
        "/assistant/audio-note",
        multipart_body("file", "audio/webm", b"recorded"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing 'audio' file field in form-data");

    let (status, _) = send(&app, Method::POST, "/assistant/audio-note", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn audio_note_rejects_unusable_model_reply() {
    let state = state()
        .await
        .with_assistant(Assistant::new(Arc::new(FixedReply("no idea"))));
    let app = router(state);

    let (status, body) = send_form(
        &app,
        "/assistant/audio-note",
        multipart_body("audio", "audio/ogg", b"recorded"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("valid JSON"));
}

#[tokio::test]
async fn bearer_token_guards_every_route() {
    let app = router(state().await.with_auth_token("s3cret"));

    let (status, body) = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization");

    let request = Request::builder()
        .uri("/tasks")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
