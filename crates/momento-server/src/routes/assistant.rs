//! `/assistant`: the tool-calling chat loop, task form parsing, and voice notes.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use momento_assistant::voice::INLINE_AUDIO_LIMIT;
use momento_assistant::{ChatReply, Content, TaskDraft, VoiceNote};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Multipart field carrying the recording.
pub const AUDIO_FIELD: &str = "audio";
/// Request body cap for voice notes: the inline audio limit plus form overhead.
pub const AUDIO_BODY_LIMIT: usize = INLINE_AUDIO_LIMIT + 64 * 1024;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub history: Vec<Content>,
}

#[derive(Debug, Deserialize)]
pub struct ParseBody {
    #[serde(default)]
    pub text: String,
}

pub async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatBody>,
) -> Result<Json<ChatReply>, ApiError> {
    let assistant = state.assistant()?;
    let reply = assistant.respond(&state.service, body.history).await?;
    tracing::info!(
        iterations = reply.iterations,
        exhausted = reply.exhausted,
        tools = reply.tool_calls.len(),
        "assistant replied"
    );
    Ok(Json(reply))
}

pub async fn parse_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ParseBody>,
) -> Result<Json<TaskDraft>, ApiError> {
    let assistant = state.assistant()?;
    Ok(Json(assistant.parse_task(&body.text).await?))
}

/// Transcribe the `audio` field of a multipart form into a note draft.
/// The draft is returned for review; nothing is saved.
pub async fn audio_note(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VoiceNote>, ApiError> {
    let assistant = state.assistant()?;
    let mut multipart = multipart?;

    let mut audio = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let mime_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        audio = Some((bytes, mime_type));
    }
    let Some((bytes, mime_type)) = audio else {
        return Err(ApiError::bad_request(
            "Missing 'audio' file field in form-data",
        ));
    };

    let note = assistant
        .transcribe_note(&bytes, mime_type.as_deref())
        .await?;
    tracing::info!(bytes = bytes.len(), title = %note.title, "transcribed voice note");
    Ok(Json(note))
}
