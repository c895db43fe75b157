//! Repository modules implementing operations for all Momento entities.
//!
//! Each module adds methods to `MomentoService` via `impl MomentoService` blocks.

pub mod activity;
pub mod momento;
pub mod note;
pub mod task;
pub mod task_log;
pub mod trash;
