pub mod activity;
pub mod chat;
pub mod dispatch;
pub mod momento;
pub mod note;
pub mod serve;
pub mod task;
