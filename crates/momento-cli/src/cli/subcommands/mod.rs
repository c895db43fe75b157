mod momento;
mod note;
mod task;

pub use momento::MomentoCommands;
pub use note::NoteCommands;
pub use task::TaskCommands;

use chrono::{NaiveDate, NaiveTime};

/// Accept any date format the store understands.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    momento_core::time::parse_date(value).ok_or_else(|| format!("unrecognized date '{value}'"))
}

/// Accept `15:00`, `3pm`, `3:30 PM` and similar.
pub fn parse_time_arg(value: &str) -> Result<NaiveTime, String> {
    momento_core::time::parse_time(value).ok_or_else(|| format!("unrecognized time '{value}'"))
}
