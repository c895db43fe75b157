//! # momento-core
//!
//! Core types shared by every Momento crate:
//! - Entity structs for tasks, task logs, notes, the activity feed and the trash
//! - The task status enum
//! - Cross-cutting error types
//! - Time normalization between human input, storage and display
//! - Resolution of free-text identifiers against active momento tasks
//! - Response shapes returned by the HTTP surface and the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod momento;
pub mod outcome;
pub mod responses;
pub mod time;
