// Mutation events returned to callers

use crate::models::Task;
use serde::Serialize;

/// What happened during a successful mutation.
///
/// The ops layer attaches one of these to each mutation result; forwarding
/// them (to a push channel, a log, nowhere) is entirely the caller's
/// business. Neither the store nor the ops layer holds a reference to any
/// notification machinery.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    Created { task: Task },
    Updated { task: Task },
    Deleted { id: String },
    Reordered { ids: Vec<String> },
}

impl TaskEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            TaskEvent::Created { .. } => "created",
            TaskEvent::Updated { .. } => "updated",
            TaskEvent::Deleted { .. } => "deleted",
            TaskEvent::Reordered { .. } => "reordered",
        }
    }
}
