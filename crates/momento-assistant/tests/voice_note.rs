//! Voice notes through the Gemini client against a mock server.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use momento_assistant::voice::INLINE_AUDIO_LIMIT;
use momento_assistant::{Assistant, AssistantError, VoiceNote};
use momento_config::{AssistantConfig, MomentoConfig};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn assistant(server: &MockServer) -> Assistant {
    Assistant::from_config(&MomentoConfig {
        assistant: AssistantConfig {
            api_key: "test-key".into(),
            base_url: server.uri(),
            ..AssistantConfig::default()
        },
        ..MomentoConfig::default()
    })
    .unwrap()
}

fn model_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    }))
}

#[tokio::test]
async fn sends_audio_inline_and_reads_the_note() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{"inlineData": {"mimeType": "audio/ogg", "data": "b2dnLWJ5dGVz"}}]
            }],
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(model_reply(
            r#"{"title": "Groceries", "content": "Buy milk, eggs and bread."}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let note = assistant(&server)
        .transcribe_note(b"ogg-bytes", Some("audio/ogg"))
        .await
        .unwrap();
    assert_eq!(
        note,
        VoiceNote {
            title: "Groceries".into(),
            content: "Buy milk, eggs and bread.".into(),
        }
    );
}

#[tokio::test]
async fn missing_mime_type_defaults_to_webm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"inlineData": {"mimeType": "audio/webm"}}]}]
        })))
        .respond_with(model_reply(r#"{"title": "Idea", "content": "Try the new layout."}"#))
        .expect(1)
        .mount(&server)
        .await;

    let note = assistant(&server).transcribe_note(b"webm", None).await.unwrap();
    assert_eq!(note.title, "Idea");
}

#[tokio::test]
async fn unusable_reply_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(model_reply("I could not hear anything."))
        .mount(&server)
        .await;

    let err = assistant(&server)
        .transcribe_note(b"noise", Some("audio/webm"))
        .await
        .unwrap_err();
    assert!(matches!(err, AssistantError::InvalidResponse(_)));
}

#[tokio::test]
async fn empty_and_oversized_audio_never_reach_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(model_reply("{}"))
        .expect(0)
        .mount(&server)
        .await;
    let assistant = assistant(&server);

    let err = assistant.transcribe_note(b"", None).await.unwrap_err();
    assert_eq!(err.to_string(), "No audio provided");

    let big = vec![0_u8; INLINE_AUDIO_LIMIT + 1];
    let err = assistant.transcribe_note(&big, None).await.unwrap_err();
    assert!(matches!(err, AssistantError::InvalidRequest(_)));
}
