//! Cross-cutting error types for Momento.
//!
//! Storage errors live in `momento-db` and wrap this type, so every layer
//! above the store sees one taxonomy: validation, not found, and the three
//! momento resolution failures.

use thiserror::Error;

/// Errors that can be raised by any Momento crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Input was rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    /// A finish was requested while no momento task is running.
    #[error("No active momento tasks found to finish.")]
    NoActiveMomento,

    /// The identifier matched none of the running momento tasks.
    #[error("Could not find momento task \"{identifier}\". Active momento tasks: {candidates}")]
    MomentoNotFound {
        identifier: String,
        candidates: String,
    },

    /// The identifier matched more than one running momento task.
    #[error(
        "Multiple active momento tasks match \"{identifier}\": {candidates}. Please specify which one by ID."
    )]
    AmbiguousMomento {
        identifier: String,
        candidates: String,
    },
}

impl CoreError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
