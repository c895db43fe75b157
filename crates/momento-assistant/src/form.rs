//! Free text → task form fields, in one model call without tools.

use chrono::Utc;
use momento_core::time::{parse_to_date, parse_to_time};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assistant::Assistant;
use crate::content::Content;
use crate::error::AssistantError;
use crate::prompt::task_form_prompt;
use crate::provider::ModelRequest;

/// Fixed confidence reported with every draft.
pub const DRAFT_CONFIDENCE: f32 = 0.8;

/// Task fields proposed by the model. Nothing is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTask {
    pub title: String,
    pub description: String,
    pub task_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub task: ParsedTask,
    pub confidence: f32,
}

/// Body of a reply that may be wrapped in a Markdown code fence.
pub(crate) fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let inner = reply
        .split_once("```json")
        .or_else(|| reply.split_once("```"))
        .map_or(reply, |(_, rest)| rest);
    inner.split_once("```").map_or(inner, |(body, _)| body).trim()
}

pub(crate) fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Interpret the model's reply.
///
/// # Errors
///
/// Returns [`AssistantError::InvalidResponse`] when the reply is not JSON or
/// lacks a title or description.
pub fn parse_draft(reply: &str) -> Result<ParsedTask, AssistantError> {
    let value: Value = serde_json::from_str(strip_code_fence(reply)).map_err(|e| {
        tracing::warn!(%e, reply, "unparseable task draft");
        AssistantError::InvalidResponse("Failed to parse AI response".into())
    })?;

    let (Some(title), Some(description)) = (
        non_empty_str(&value, "title"),
        non_empty_str(&value, "description"),
    ) else {
        return Err(AssistantError::InvalidResponse(
            "AI could not extract required title and description".into(),
        ));
    };

    Ok(ParsedTask {
        title: title.to_string(),
        description: description.to_string(),
        task_date: non_empty_str(&value, "task_date").and_then(parse_to_date),
        start_time: non_empty_str(&value, "start_time").and_then(parse_to_time),
        end_time: non_empty_str(&value, "end_time").and_then(parse_to_time),
    })
}

impl Assistant {
    /// Ask the model to fill task fields from `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::InvalidRequest`] for blank input, provider
    /// errors, and [`parse_draft`] failures.
    pub async fn parse_task(&self, text: &str) -> Result<TaskDraft, AssistantError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistantError::InvalidRequest("No text provided".into()));
        }

        let system = task_form_prompt(Utc::now(), self.display());
        let contents = [Content::user_text(format!(
            "User input: \"{text}\"\n\nExtracted task information:"
        ))];
        let request = ModelRequest {
            json_output: true,
            temperature: Some(0.1),
            max_output_tokens: Some(500),
            ..ModelRequest::new(&system, &contents)
        };

        let turn = self.provider().generate(request).await?;
        Ok(TaskDraft {
            task: parse_draft(&turn.text())?,
            confidence: DRAFT_CONFIDENCE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("{\"a\": 1}")]
    #[case("```json\n{\"a\": 1}\n```")]
    #[case("Here you go:\n```\n{\"a\": 1}\n```\nThanks")]
    fn strips_fences(#[case] reply: &str) {
        assert_eq!(strip_code_fence(reply), "{\"a\": 1}");
    }

    #[test]
    fn normalizes_date_and_times() {
        let draft = parse_draft(
            r#"{"title": "Standup", "description": "Team standup", "task_date": "2025-07-30",
                "start_time": "9am", "end_time": "9:30 AM"}"#,
        )
        .unwrap();
        assert_eq!(draft.task_date.as_deref(), Some("2025-07-30"));
        assert_eq!(draft.start_time.as_deref(), Some("09:00"));
        assert_eq!(draft.end_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn unparseable_fields_become_null() {
        let draft = parse_draft(
            r#"{"title": "Gym", "description": "Gym", "task_date": "someday", "start_time": null}"#,
        )
        .unwrap();
        assert_eq!(draft.task_date, None);
        assert_eq!(draft.start_time, None);
        assert_eq!(draft.end_time, None);
    }

    #[test]
    fn requires_title_and_description() {
        let err = parse_draft(r#"{"title": "Only a title"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid model response: AI could not extract required title and description"
        );
        let err = parse_draft("not json").unwrap_err();
        assert_eq!(err.to_string(), "invalid model response: Failed to parse AI response");
    }
}
