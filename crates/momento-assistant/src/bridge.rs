//! Dispatch of model function calls onto the task store.
//!
//! Each declared tool maps to one [`MomentoService`] operation. Arguments
//! arrive as loosely typed JSON: ids may be numbers or numeric strings, and
//! dates and times go through the same lenient parsing as the HTTP surface.

use momento_core::entities::{NewNote, NewTask};
use momento_db::service::MomentoService;
use momento_db::updates::note::NoteUpdate;
use momento_db::updates::task::TaskUpdate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::ToolError;
use crate::tools;

/// An id as a model sends it: `3`, `3.0`, or `"3"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawId {
    fn as_text(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn to_id(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract().abs() < f64::EPSILON => Some(*f as i64),
            Self::Float(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

#[derive(Deserialize)]
struct IdArgs {
    id: RawId,
}

#[derive(Deserialize)]
struct AddLogArgs {
    #[serde(default)]
    task_id: Option<RawId>,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct EditTaskExtras {
    #[serde(default)]
    add_log: Option<String>,
}

#[derive(Deserialize)]
struct StartArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct FinishArgs {
    identifier: RawId,
}

/// Executes tool calls against one service.
pub struct ToolBridge<'a> {
    service: &'a MomentoService,
}

impl<'a> ToolBridge<'a> {
    #[must_use]
    pub const fn new(service: &'a MomentoService) -> Self {
        Self { service }
    }

    /// Run `name` and wrap the outcome for the model: `{"result": ...}` on
    /// success, `{"error": "..."}` on failure.
    pub async fn call(&self, name: &str, args: &Value) -> Value {
        match self.dispatch(name, args).await {
            Ok(result) => {
                tracing::debug!(tool = name, "tool call succeeded");
                json!({ "result": result })
            }
            Err(error) => {
                tracing::info!(tool = name, %error, "tool call failed");
                json!({ "error": error.to_string() })
            }
        }
    }

    /// Run `name` and return its raw result.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] for unknown tools, malformed arguments, or any
    /// store or validation failure.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        let svc = self.service;
        let value = match name {
            tools::CREATE_TASK => {
                let new: NewTask = parse_args(name, args)?;
                serde_json::to_value(svc.create_task(new).await?)?
            }
            tools::EDIT_TASK => {
                let id = require_id(name, args)?;
                let update: TaskUpdate = parse_args(name, args)?;
                let extras: EditTaskExtras = parse_args(name, args)?;
                let task = svc.update_task(id, &update).await?;
                let log = match extras.add_log.as_deref().map(str::trim) {
                    Some(content) if !content.is_empty() => {
                        Some(svc.create_task_log(id, content).await?)
                    }
                    _ => None,
                };
                json!({ "task": task, "log": log })
            }
            tools::DELETE_TASK => {
                let id = require_id(name, args)?;
                serde_json::to_value(svc.delete_task(id).await?)?
            }
            tools::FETCH_TASKS => serde_json::to_value(svc.list_tasks().await?)?,
            tools::CREATE_NOTE => {
                let new: NewNote = parse_args(name, args)?;
                serde_json::to_value(svc.create_note(new).await?)?
            }
            tools::EDIT_NOTE => {
                let id = require_id(name, args)?;
                let update: NoteUpdate = parse_args(name, args)?;
                if update.is_empty() {
                    return Err(invalid(name, "provide at least one of title or content"));
                }
                serde_json::to_value(svc.update_note(id, &update).await?)?
            }
            tools::DELETE_NOTE => {
                let id = require_id(name, args)?;
                serde_json::to_value(svc.delete_note(id).await?)?
            }
            tools::FETCH_NOTES => serde_json::to_value(svc.list_notes().await?)?,
            tools::ADD_TASK_LOG => {
                let AddLogArgs { task_id, content } = parse_args(name, args)?;
                let task_id = match task_id.filter(|raw| !raw.is_blank()) {
                    Some(raw) => Some(
                        raw.to_id()
                            .ok_or_else(|| invalid(name, format!("not a task id: {}", raw.as_text())))?,
                    ),
                    None => None,
                };
                serde_json::to_value(svc.add_log_smart(task_id, &content).await?)?
            }
            tools::START_MOMENTO_TASK => {
                let StartArgs { title, description } = parse_args(name, args)?;
                serde_json::to_value(svc.start_momento(&title, description.as_deref()).await?)?
            }
            tools::FINISH_MOMENTO_TASK => {
                let FinishArgs { identifier } = parse_args(name, args)?;
                serde_json::to_value(svc.finish_momento(&identifier.as_text()).await?)?
            }
            tools::GET_ACTIVE_MOMENTO_TASKS => {
                serde_json::to_value(svc.active_momento_tasks().await?)?
            }
            other => return Err(ToolError::UnknownFunction(other.to_string())),
        };
        Ok(value)
    }
}

fn invalid(tool: &str, reason: impl Into<String>) -> ToolError {
    ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: reason.into(),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: &Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args.clone() };
    serde_json::from_value(args).map_err(|e| invalid(tool, e.to_string()))
}

fn require_id(tool: &str, args: &Value) -> Result<i64, ToolError> {
    let IdArgs { id } = parse_args(tool, args)?;
    id.to_id()
        .ok_or_else(|| invalid(tool, format!("not a valid id: {}", id.as_text())))
}
