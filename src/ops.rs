// Application-level operations over the task store

use crate::events::TaskEvent;
use crate::models::{NewTask, Task, TaskPatch};
use crate::stats::Statistics;
use crate::store::TaskStore;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Recoverable outcomes of the ops layer. This is the only layer that
/// turns an absent store result into a distinguishable `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpsError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("task not found: {0}")]
    NotFound(String),
}

/// Orchestration layer: translates caller intents into store calls,
/// supplies derived defaults, and attaches a [`TaskEvent`] to every
/// successful mutation.
pub struct TaskOps {
    store: Arc<TaskStore>,
}

impl TaskOps {
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn list(&self) -> Vec<Task> {
        self.store.all()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.store.get(id)
    }

    /// Create a task. Trims the title and rejects a blank one; defaults
    /// priority when the request carries none.
    pub fn create(&self, mut req: NewTask) -> Result<(Task, TaskEvent), OpsError> {
        req.title = req.title.trim().to_string();
        if req.title.is_empty() {
            return Err(OpsError::Validation("title cannot be empty".to_string()));
        }

        info!(title = %req.title, "creating task");
        let task = self.store.create(Task::new(req));
        let event = TaskEvent::Created { task: task.clone() };
        Ok((task, event))
    }

    /// Apply a partial update. A patched title is trimmed and must not end
    /// up empty; absent fields never mutate.
    pub fn update(&self, id: &str, mut patch: TaskPatch) -> Result<(Task, TaskEvent), OpsError> {
        if let Some(title) = patch.title.take() {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(OpsError::Validation("title cannot be empty".to_string()));
            }
            patch.title = Some(title);
        }

        info!(id, "updating task");
        match self.store.update(id, patch) {
            Some(task) => {
                let event = TaskEvent::Updated { task: task.clone() };
                Ok((task, event))
            }
            None => {
                warn!(id, "task not found for update");
                Err(OpsError::NotFound(id.to_string()))
            }
        }
    }

    /// Delete a task. Absence is reported as `false`, not an error, and
    /// produces no event.
    pub fn delete(&self, id: &str) -> (bool, Option<TaskEvent>) {
        if self.store.delete(id) {
            (true, Some(TaskEvent::Deleted { id: id.to_string() }))
        } else {
            warn!(id, "task not found for deletion");
            (false, None)
        }
    }

    /// Search across titles, categories, and tags. Blank queries are
    /// rejected here; the store itself takes any text literally.
    pub fn search(&self, query: &str) -> Result<Vec<Task>, OpsError> {
        if query.trim().is_empty() {
            return Err(OpsError::Validation("search query cannot be empty".to_string()));
        }
        Ok(self.store.search(query))
    }

    /// Reorder the listed tasks to match the given sequence. Partial lists
    /// and unknown ids are accepted as-is (see [`TaskStore::reorder`]).
    pub fn reorder(&self, ordered_ids: Vec<String>) -> TaskEvent {
        self.store.reorder(&ordered_ids);
        TaskEvent::Reordered { ids: ordered_ids }
    }

    /// Compute aggregate statistics from one consistent snapshot.
    pub fn statistics(&self) -> Statistics {
        let snapshot = self.store.all();
        Statistics::compute(&snapshot, Utc::now().date_naive())
    }

    /// Populate the store with a few sample tasks. Used by the CLI's
    /// `--seed` flag and by tests that want a non-empty store.
    pub fn seed_samples(&self) -> Result<Vec<Task>, OpsError> {
        let samples = [
            NewTask {
                title: "Welcome to the task store".to_string(),
                priority: Some("high".to_string()),
                category: Some("Getting Started".to_string()),
                due_date: None,
                tags: vec!["welcome".to_string(), "tutorial".to_string()],
            },
            NewTask {
                title: "Try move to reorder tasks".to_string(),
                priority: Some("medium".to_string()),
                category: Some("Features".to_string()),
                due_date: None,
                tags: vec![],
            },
            NewTask {
                title: "Run stats for an overview".to_string(),
                priority: Some("low".to_string()),
                category: Some("Features".to_string()),
                due_date: None,
                tags: vec![],
            },
        ];

        let mut created = Vec::with_capacity(samples.len());
        for sample in samples {
            let (task, _) = self.create(sample)?;
            created.push(task);
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops() -> TaskOps {
        TaskOps::new(Arc::new(TaskStore::new()))
    }

    #[test]
    fn test_create_trims_title() {
        let ops = ops();
        let (task, event) = ops.create(NewTask::titled("  My Task  ")).unwrap();
        assert_eq!(task.title, "My Task");
        assert_eq!(event.kind(), "created");
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let ops = ops();

        for bad in ["", "   ", "\t\n"] {
            let err = ops.create(NewTask::titled(bad)).unwrap_err();
            assert!(matches!(err, OpsError::Validation(_)));
        }
        assert_eq!(ops.store().len(), 0);
    }

    #[test]
    fn test_update_trims_and_validates_title() {
        let ops = ops();
        let (task, _) = ops.create(NewTask::titled("before")).unwrap();

        let (updated, event) = ops
            .update(
                &task.id,
                TaskPatch {
                    title: Some("  after  ".to_string()),
                    ..TaskPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "after");
        assert_eq!(event.kind(), "updated");

        let err = ops
            .update(
                &task.id,
                TaskPatch {
                    title: Some("   ".to_string()),
                    ..TaskPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, OpsError::Validation(_)));
        assert_eq!(ops.get(&task.id).unwrap().title, "after");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let ops = ops();
        let err = ops
            .update(
                "no-such-id",
                TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, OpsError::NotFound("no-such-id".to_string()));
        assert_eq!(ops.store().len(), 0);
    }

    #[test]
    fn test_delete_reports_absence_without_event() {
        let ops = ops();
        let (task, _) = ops.create(NewTask::titled("doomed")).unwrap();

        let (deleted, event) = ops.delete(&task.id);
        assert!(deleted);
        assert!(matches!(event, Some(TaskEvent::Deleted { .. })));

        let (deleted, event) = ops.delete(&task.id);
        assert!(!deleted);
        assert!(event.is_none());
    }

    #[test]
    fn test_search_rejects_blank_query() {
        let ops = ops();
        ops.create(NewTask::titled("findable")).unwrap();

        assert!(matches!(ops.search("  "), Err(OpsError::Validation(_))));
        assert_eq!(ops.search("FIND").unwrap().len(), 1);
    }

    #[test]
    fn test_reorder_emits_event_with_ids() {
        let ops = ops();
        let (a, _) = ops.create(NewTask::titled("a")).unwrap();
        let (b, _) = ops.create(NewTask::titled("b")).unwrap();

        let event = ops.reorder(vec![b.id.clone(), a.id.clone()]);
        match event {
            TaskEvent::Reordered { ids } => assert_eq!(ids, vec![b.id.clone(), a.id.clone()]),
            other => panic!("unexpected event: {:?}", other),
        }

        let titles: Vec<String> = ops.list().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_statistics_reflect_store() {
        let ops = ops();
        let stats = ops.statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);

        let (a, _) = ops.create(NewTask::titled("a")).unwrap();
        ops.create(NewTask::titled("b")).unwrap();
        ops.update(
            &a.id,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap();

        let stats = ops.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completion_rate, 50.0);
    }

    #[test]
    fn test_seed_samples() {
        let ops = ops();
        let created = ops.seed_samples().unwrap();
        assert_eq!(created.len(), 3);
        assert_eq!(ops.store().len(), 3);
        assert_eq!(created[0].priority, "high");
        assert_eq!(ops.search("welcome").unwrap().len(), 1);
    }

    #[test]
    fn test_shared_store_across_ops_handles() {
        // Two ops handles over one store see each other's writes; separate
        // stores stay independent (no ambient global state).
        let store = Arc::new(TaskStore::new());
        let ops_a = TaskOps::new(Arc::clone(&store));
        let ops_b = TaskOps::new(store);
        let other = TaskOps::new(Arc::new(TaskStore::new()));

        ops_a.create(NewTask::titled("shared")).unwrap();
        assert_eq!(ops_b.list().len(), 1);
        assert!(other.list().is_empty());
    }
}
