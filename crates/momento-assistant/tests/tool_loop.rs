//! Tool-calling loop against a scripted model and a real in-memory store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use momento_assistant::content::{Content, Part};
use momento_assistant::provider::{ChatProvider, ModelRequest};
use momento_assistant::{Assistant, AssistantError, EXHAUSTED_REPLY};
use momento_db::service::MomentoService;

/// Replays canned model turns and records every conversation it was sent.
#[derive(Default)]
struct ScriptedProvider {
    turns: Mutex<VecDeque<Content>>,
    seen: Mutex<Vec<Vec<Content>>>,
}

impl ScriptedProvider {
    fn new(turns: Vec<Content>) -> Arc<Self> {
        Arc::new(Self {
            turns: Mutex::new(turns.into()),
            seen: Mutex::default(),
        })
    }

    fn seen(&self) -> Vec<Vec<Content>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn generate(&self, request: ModelRequest<'_>) -> Result<Content, AssistantError> {
        self.seen.lock().unwrap().push(request.contents.to_vec());
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AssistantError::InvalidResponse("script exhausted".into()))
    }
}

fn call(name: &str, args: Value) -> Content {
    Content {
        role: "model".into(),
        parts: vec![Part::function_call(name, args)],
    }
}

fn function_response(turn: &Content) -> &Value {
    &turn.parts[0].function_response.as_ref().unwrap().response
}

async fn service() -> MomentoService {
    MomentoService::new_local(":memory:").await.unwrap()
}

#[tokio::test]
async fn plain_answer_needs_one_iteration() {
    let svc = service().await;
    let provider = ScriptedProvider::new(vec![Content::model_text("Hi there!")]);
    let assistant = Assistant::new(provider.clone());

    let reply = assistant
        .respond(&svc, vec![Content::user_text("hello")])
        .await
        .unwrap();

    assert_eq!(reply.reply, "Hi there!");
    assert_eq!(reply.iterations, 1);
    assert!(!reply.exhausted);
    assert!(reply.tool_calls.is_empty());
}

#[tokio::test]
async fn executes_call_and_feeds_result_back() {
    let svc = service().await;
    let provider = ScriptedProvider::new(vec![
        call(
            "create_task",
            json!({"title": "Dinner", "description": "with Sam", "start_time": "6pm", "end_time": "8 PM"}),
        ),
        Content::model_text("Added Dinner from 18:00 to 20:00."),
    ]);
    let assistant = Assistant::new(provider.clone());

    let reply = assistant
        .respond(&svc, vec![Content::user_text("dinner 6pm to 8pm")])
        .await
        .unwrap();

    assert_eq!(reply.iterations, 2);
    assert_eq!(reply.tool_calls, vec!["create_task"]);

    let tasks = svc.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].start_time.unwrap().to_string(), "18:00:00");

    let seen = provider.seen();
    let second = &seen[1];
    assert_eq!(second.len(), 3);
    assert_eq!(second[1].role, "model");
    assert_eq!(second[2].role, "user");
    let response = function_response(&second[2]);
    assert_eq!(response["result"]["title"], "Dinner");
    assert_eq!(response["result"]["start_time"], "18:00");
}

#[tokio::test]
async fn tool_errors_go_back_to_the_model() {
    let svc = service().await;
    let provider = ScriptedProvider::new(vec![
        call("finish_momento_task", json!({"identifier": "gym"})),
        Content::model_text("You have no active momento tasks."),
    ]);
    let assistant = Assistant::new(provider.clone());

    let reply = assistant
        .respond(&svc, vec![Content::user_text("done with gym")])
        .await
        .unwrap();
    assert!(!reply.exhausted);

    let seen = provider.seen();
    let response = function_response(&seen[1][2]);
    assert_eq!(
        response,
        &json!({"error": "No active momento tasks found to finish."})
    );
}

#[tokio::test]
async fn only_the_first_call_of_a_turn_runs() {
    let svc = service().await;
    let provider = ScriptedProvider::new(vec![
        Content {
            role: "model".into(),
            parts: vec![
                Part::function_call("create_note", json!({"title": "A", "content": "a"})),
                Part::function_call("create_note", json!({"title": "B", "content": "b"})),
            ],
        },
        Content::model_text("Saved."),
    ]);
    let assistant = Assistant::new(provider);

    assistant
        .respond(&svc, vec![Content::user_text("two notes")])
        .await
        .unwrap();
    let notes = svc.list_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "A");
}

#[tokio::test]
async fn stops_at_the_iteration_cap() {
    let svc = service().await;
    let provider = ScriptedProvider::new(
        (0..5).map(|_| call("fetch_tasks", json!({}))).collect(),
    );
    let assistant = Assistant::new(provider.clone()).with_max_iterations(3);

    let reply = assistant
        .respond(&svc, vec![Content::user_text("loop forever")])
        .await
        .unwrap();

    assert!(reply.exhausted);
    assert_eq!(reply.reply, EXHAUSTED_REPLY);
    assert_eq!(reply.iterations, 3);
    assert_eq!(reply.tool_calls.len(), 3);
    assert_eq!(provider.seen().len(), 3);
}

#[tokio::test]
async fn momento_round_trip_through_tools() {
    let svc = service().await;
    let provider = ScriptedProvider::new(vec![
        call("start_momento_task", json!({"title": "Go to gym"})),
        call("add_task_log", json!({"content": "Leg day"})),
        call("get_active_momento_tasks", json!({})),
        call("finish_momento_task", json!({"identifier": "gym"})),
        Content::model_text("Nice workout!"),
    ]);
    let assistant = Assistant::new(provider.clone());

    let reply = assistant
        .respond(&svc, vec![Content::user_text("gym time")])
        .await
        .unwrap();
    assert_eq!(reply.iterations, 5);

    let seen = provider.seen();
    let active = function_response(seen[3].last().unwrap());
    assert_eq!(active["result"][0]["title"], "Go to gym");
    assert_eq!(active["result"][0]["current_duration"], "0m");

    let finished = function_response(seen[4].last().unwrap());
    assert_eq!(finished["result"]["duration"], "0m");
    assert!(svc.list_active_momento_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_history_is_rejected() {
    let svc = service().await;
    let assistant = Assistant::new(ScriptedProvider::new(vec![]));
    let err = assistant.respond(&svc, vec![]).await.unwrap_err();
    assert!(matches!(err, AssistantError::InvalidRequest(_)));
}

#[tokio::test]
async fn provider_errors_propagate() {
    let svc = service().await;
    let assistant = Assistant::new(ScriptedProvider::new(vec![]));
    let err = assistant
        .respond(&svc, vec![Content::user_text("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, AssistantError::InvalidResponse(_)));
}

#[tokio::test]
async fn parse_task_uses_single_tool_free_call() {
    let provider = ScriptedProvider::new(vec![Content::model_text(
        "```json\n{\"title\": \"Meeting with John\", \"description\": \"Meeting with John at 3pm\", \"task_date\": \"2025-07-30\", \"start_time\": \"3pm\", \"end_time\": null}\n```",
    )]);
    let assistant = Assistant::new(provider.clone());

    let draft = assistant.parse_task("Meeting with John tomorrow at 3pm").await.unwrap();
    assert_eq!(draft.task.title, "Meeting with John");
    assert_eq!(draft.task.start_time.as_deref(), Some("15:00"));
    assert_eq!(draft.task.end_time, None);
    assert!((draft.confidence - 0.8).abs() < f32::EPSILON);
    assert_eq!(provider.seen().len(), 1);

    let err = assistant.parse_task("   ").await.unwrap_err();
    assert_eq!(err.to_string(), "No text provided");
}
