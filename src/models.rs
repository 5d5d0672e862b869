// Data models for the task store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default priority label applied when a creation request carries none.
pub const DEFAULT_PRIORITY: &str = "medium";

/// A single to-do entry.
///
/// `position` drives the user-visible ordering; it is assigned by the store
/// on insert (append-to-end) and rewritten by reorder operations. Between
/// structural operations positions may be sparse or duplicated and are only
/// meaningful as a relative ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub position: usize,
    pub priority: String,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a fresh task from a creation request.
    ///
    /// Assigns a time-ordered v7 uuid and the creation timestamp; the title
    /// is taken as-is (trimming and validation happen in the ops layer) and
    /// the position is assigned later by the store.
    pub fn new(req: NewTask) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: req.title,
            completed: false,
            position: 0,
            priority: req.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            category: req.category,
            due_date: req.due_date,
            tags: req.tags,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Creation intent: the caller-supplied fields of a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update: each field is independently present or absent.
///
/// `None` always means "leave the stored value alone" — including for
/// `priority`, and including `completed`, which uses `Option<bool>` rather
/// than overloading `false`. There is no way to clear an optional field
/// through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.tags.is_none()
    }
}
