//! Function declarations advertised to the model.

use serde_json::{Value, json};

use crate::content::FunctionDeclaration;

pub const CREATE_TASK: &str = "create_task";
pub const EDIT_TASK: &str = "edit_task";
pub const DELETE_TASK: &str = "delete_task";
pub const FETCH_TASKS: &str = "fetch_tasks";
pub const CREATE_NOTE: &str = "create_note";
pub const EDIT_NOTE: &str = "edit_note";
pub const DELETE_NOTE: &str = "delete_note";
pub const FETCH_NOTES: &str = "fetch_notes";
pub const ADD_TASK_LOG: &str = "add_task_log";
pub const START_MOMENTO_TASK: &str = "start_momento_task";
pub const FINISH_MOMENTO_TASK: &str = "finish_momento_task";
pub const GET_ACTIVE_MOMENTO_TASKS: &str = "get_active_momento_tasks";

const STATUS_VALUES: [&str; 3] = ["pending", "in_progress", "completed"];

fn declare(name: &str, description: &str, properties: Value, required: &[&str]) -> FunctionDeclaration {
    FunctionDeclaration {
        name: name.to_string(),
        description: description.to_string(),
        parameters: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

fn id_property(what: &str) -> Value {
    json!({"type": "string", "description": format!("The unique identifier of the {what}.")})
}

fn schedule_properties(prefix: &str) -> Value {
    json!({
        "status": {
            "type": "string",
            "description": format!("The {prefix}status of the task (optional)."),
            "enum": STATUS_VALUES,
        },
        "task_date": {
            "type": "string",
            "description": format!("The {prefix}date for the task (optional, format: \"YYYY-MM-DD\" like \"2025-01-29\")."),
        },
        "start_time": {
            "type": "string",
            "description": format!("The {prefix}start time (optional, format: \"HH:MM\" in 24-hour format like \"18:00\")."),
        },
        "end_time": {
            "type": "string",
            "description": format!("The {prefix}end time (optional, format: \"HH:MM\" in 24-hour format like \"20:00\"). Must be after the start time."),
        },
    })
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

/// Every function the assistant may call, in a stable order.
#[must_use]
pub fn declarations() -> Vec<FunctionDeclaration> {
    vec![
        declare(
            CREATE_TASK,
            "Creates a new task with a title, description, optional status, and optional scheduling (date, start time, end time).",
            merge(
                json!({
                    "title": {"type": "string", "description": "The title of the task (required)."},
                    "description": {"type": "string", "description": "A detailed description of the task."},
                }),
                schedule_properties(""),
            ),
            &["title"],
        ),
        declare(
            EDIT_TASK,
            "Edits an existing task. Provide the task id and any fields to update. Optionally appends a log entry to the task.",
            merge(
                json!({
                    "id": id_property("task to edit"),
                    "title": {"type": "string", "description": "The new title of the task (optional)."},
                    "description": {"type": "string", "description": "The new description of the task (optional)."},
                    "add_log": {"type": "string", "description": "A progress note to append to the task's log (optional)."},
                }),
                schedule_properties("new "),
            ),
            &["id"],
        ),
        declare(
            DELETE_TASK,
            "Deletes a task by its unique identifier. The task and its logs are moved to the trash.",
            json!({"id": id_property("task to delete")}),
            &["id"],
        ),
        declare(
            FETCH_TASKS,
            "Fetches all tasks with their details, including id, title, description, status, task_date, start_time, and end_time.",
            json!({}),
            &[],
        ),
        declare(
            CREATE_NOTE,
            "Creates a new note with a title and content.",
            json!({
                "title": {"type": "string", "description": "The title of the note."},
                "content": {"type": "string", "description": "The body of the note."},
            }),
            &["title", "content"],
        ),
        declare(
            EDIT_NOTE,
            "Edits an existing note. Fields that are not provided keep their current values; provide at least one of title or content.",
            json!({
                "id": id_property("note to edit"),
                "title": {"type": "string", "description": "The new title (optional)."},
                "content": {"type": "string", "description": "The new content (optional)."},
            }),
            &["id"],
        ),
        declare(
            DELETE_NOTE,
            "Deletes a note by its unique identifier.",
            json!({"id": id_property("note to delete")}),
            &["id"],
        ),
        declare(
            FETCH_NOTES,
            "Fetches all notes, most recently updated first.",
            json!({}),
            &[],
        ),
        declare(
            ADD_TASK_LOG,
            "Adds a progress log entry to a task. If no task_id is given, the entry goes to the active momento task.",
            json!({
                "task_id": {"type": "string", "description": "The task to log to (optional when a momento task is active)."},
                "content": {"type": "string", "description": "The log entry text."},
            }),
            &["content"],
        ),
        declare(
            START_MOMENTO_TASK,
            "Starts tracking a spontaneous task the user is beginning right now.",
            json!({
                "title": {"type": "string", "description": "What the user is starting to work on."},
                "description": {"type": "string", "description": "Optional details."},
            }),
            &["title"],
        ),
        declare(
            FINISH_MOMENTO_TASK,
            "Finishes an active momento task and reports how long it took. The identifier may be the task id or words from its title.",
            json!({
                "identifier": {"type": "string", "description": "Task id or part of the task title."},
            }),
            &["identifier"],
        ),
        declare(
            GET_ACTIVE_MOMENTO_TASKS,
            "Lists the momento tasks currently in progress with the time elapsed so far.",
            json!({}),
            &[],
        ),
    ]
}
