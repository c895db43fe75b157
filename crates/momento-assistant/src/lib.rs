//! # momento-assistant
//!
//! Conversational front end for the Momento task store. The model sees a
//! fixed set of functions (tasks, notes, logs, momento tracking), and
//! [`Assistant::respond`] runs the tool-calling loop until the model answers
//! in text or the iteration budget is spent.
//!
//! - [`provider::ChatProvider`] is the model seam; [`gemini::GeminiProvider`]
//!   is the production implementation.
//! - [`bridge::ToolBridge`] maps function calls onto `MomentoService`.
//! - [`Assistant::parse_task`] and [`Assistant::transcribe_note`] are single
//!   tool-free calls that draft a task from text and a note from audio.

pub mod assistant;
pub mod bridge;
pub mod content;
mod error;
pub mod form;
pub mod gemini;
mod http;
pub mod prompt;
pub mod provider;
pub mod tools;
pub mod voice;

pub use assistant::{Assistant, ChatReply, EXHAUSTED_REPLY};
pub use content::{Content, Part};
pub use error::{AssistantError, ToolError};
pub use form::{ParsedTask, TaskDraft};
pub use voice::VoiceNote;
