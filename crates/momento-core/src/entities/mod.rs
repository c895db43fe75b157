//! Entity structs for every Momento record.
//!
//! Each entity maps to one table. Timestamps are `DateTime<Utc>`, calendar
//! dates are `NaiveDate`, and times of day travel as `HH:MM` strings.

mod activity;
mod note;
mod task;
mod task_log;
mod trash;

pub use activity::ActivityLogEntry;
pub use note::{NewNote, Note};
pub use task::{ActiveMomento, NewTask, Task};
pub use task_log::TaskLog;
pub use trash::{DeletedTask, DeletedTaskLog};
