// Concurrent in-memory task store

use crate::models::{Task, TaskPatch};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// In-memory store holding the canonical set of tasks.
///
/// All structural mutations (create, update, delete, reorder) serialize on
/// a single write lock, so a task is never assigned two positions
/// concurrently and appends always observe the count after every prior
/// append. Reads take the read lock and return owned clones; callers can
/// never reach the stored values directly.
///
/// The store performs no input validation and raises no domain errors:
/// "not found" is an absent result, never an error value.
pub struct TaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    /// All tasks, sorted by position ascending; ties (possible after a
    /// partial reorder) break on creation time.
    pub fn all(&self) -> Vec<Task> {
        let tasks = self.tasks.read();
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by_key(|t| (t.position, t.created_at));
        all
    }

    /// Point lookup. Absence is a normal outcome.
    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().get(id).cloned()
    }

    /// Case-insensitive substring match over title, category, and tags.
    ///
    /// The query is taken literally; rejecting blank queries is the
    /// caller's job.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        let tasks = self.tasks.read();
        let mut hits: Vec<Task> = tasks
            .values()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.category
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by_key(|t| (t.position, t.created_at));
        hits
    }

    /// Insert a task, assigning `position` = current count (append to end).
    /// Returns the stored value.
    pub fn create(&self, mut task: Task) -> Task {
        let mut tasks = self.tasks.write();
        task.position = tasks.len();
        info!(id = %task.id, title = %task.title, position = task.position, "created task");
        tasks.insert(task.id.clone(), task.clone());
        task
    }

    /// Apply the present fields of `patch` to the task with `id`, stamping
    /// `updated_at`. Absent fields are left untouched. Returns the updated
    /// task, or `None` for an unknown id.
    pub fn update(&self, id: &str, patch: TaskPatch) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.get_mut(id)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = Some(category);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(tags) = patch.tags {
            task.tags = tags;
        }
        task.updated_at = Some(Utc::now());

        info!(id = %task.id, "updated task");
        Some(task.clone())
    }

    /// Remove the task with `id`; returns whether anything was removed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.tasks.write().remove(id).is_some();
        if removed {
            info!(id, "deleted task");
        }
        removed
    }

    /// Set each listed task's position to its index in `ordered_ids`.
    ///
    /// Unknown ids are skipped silently. Tasks omitted from the list keep
    /// their previous positions, which can leave duplicates relative to
    /// the reordered subset; `all()`'s creation-time tiebreak keeps the
    /// result deterministic.
    pub fn reorder(&self, ordered_ids: &[String]) {
        let mut tasks = self.tasks.write();
        for (index, id) in ordered_ids.iter().enumerate() {
            if let Some(task) = tasks.get_mut(id) {
                task.position = index;
            } else {
                debug!(id = %id, "reorder skipped unknown id");
            }
        }
        info!(count = ordered_ids.len(), "reordered tasks");
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.read().values().filter(|t| t.completed).count()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
