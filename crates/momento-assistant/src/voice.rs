//! Recorded audio → note draft, in one model call without tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assistant::Assistant;
use crate::content::{Content, Part, USER_ROLE};
use crate::error::AssistantError;
use crate::form::{non_empty_str, strip_code_fence};
use crate::prompt::VOICE_NOTE_PROMPT;
use crate::provider::ModelRequest;

/// Largest recording sent inline. Gemini caps inline request data at 20 MB.
pub const INLINE_AUDIO_LIMIT: usize = 18 * 1024 * 1024;
/// Longer titles from the model are cut to this many characters.
pub const NOTE_TITLE_MAX_CHARS: usize = 50;
/// Browsers record `audio/webm` when they do not say otherwise.
pub const DEFAULT_AUDIO_MIME: &str = "audio/webm";

/// Note fields proposed from a recording. Nothing is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceNote {
    pub title: String,
    pub content: String,
}

/// Interpret the model's reply.
///
/// # Errors
///
/// Returns [`AssistantError::InvalidResponse`] when the reply is not JSON or
/// lacks a title or content.
pub fn parse_voice_note(reply: &str) -> Result<VoiceNote, AssistantError> {
    let value: Value = serde_json::from_str(strip_code_fence(reply)).map_err(|e| {
        tracing::warn!(%e, reply, "unparseable voice note");
        AssistantError::InvalidResponse("AI did not return valid JSON".into())
    })?;

    let (Some(title), Some(content)) = (
        non_empty_str(&value, "title"),
        non_empty_str(&value, "content"),
    ) else {
        return Err(AssistantError::InvalidResponse(
            "AI response missing required fields 'title' and/or 'content'".into(),
        ));
    };

    Ok(VoiceNote {
        title: title.chars().take(NOTE_TITLE_MAX_CHARS).collect(),
        content: content.to_string(),
    })
}

impl Assistant {
    /// Transcribe `audio` and summarize it as a note.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::InvalidRequest`] for empty or oversized
    /// audio, provider errors, and [`parse_voice_note`] failures.
    pub async fn transcribe_note(
        &self,
        audio: &[u8],
        mime_type: Option<&str>,
    ) -> Result<VoiceNote, AssistantError> {
        if audio.is_empty() {
            return Err(AssistantError::InvalidRequest("No audio provided".into()));
        }
        if audio.len() > INLINE_AUDIO_LIMIT {
            return Err(AssistantError::InvalidRequest(format!(
                "Audio is too large ({} bytes, limit {INLINE_AUDIO_LIMIT})",
                audio.len()
            )));
        }
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_AUDIO_MIME);

        let contents = [Content {
            role: USER_ROLE.to_string(),
            parts: vec![
                Part::inline_data(mime_type, audio),
                Part::text(VOICE_NOTE_PROMPT),
            ],
        }];
        let request = ModelRequest {
            json_output: true,
            ..ModelRequest::new("", &contents)
        };

        tracing::debug!(bytes = audio.len(), mime_type, "transcribing voice note");
        let turn = self.provider().generate(request).await?;
        parse_voice_note(&turn.text())
    }
}
