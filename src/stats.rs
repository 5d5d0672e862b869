// Derived statistics over a task snapshot

use crate::models::Task;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate counters derived from one consistent snapshot of the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share in percent, rounded to two decimals; exactly 0 for
    /// an empty snapshot.
    pub completion_rate: f64,
    pub by_priority: HashMap<String, usize>,
    pub by_category: HashMap<String, usize>,
    pub due_today: usize,
    pub overdue: usize,
}

impl Statistics {
    /// Single pass over `tasks`. Every counter derives from the same
    /// snapshot, so subtotals can never drift from `total`.
    ///
    /// `today` is passed in rather than read from the clock so the due
    /// buckets are testable; due dates compare by UTC calendar date.
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = Statistics {
            total: tasks.len(),
            ..Statistics::default()
        };

        for task in tasks {
            if task.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }

            *stats.by_priority.entry(task.priority.clone()).or_insert(0) += 1;
            if let Some(category) = &task.category {
                *stats.by_category.entry(category.clone()).or_insert(0) += 1;
            }

            if let Some(due) = task.due_date {
                let due = due.date_naive();
                if due == today {
                    stats.due_today += 1;
                }
                if due < today && !task.completed {
                    stats.overdue += 1;
                }
            }
        }

        if stats.total > 0 {
            let rate = stats.completed as f64 / stats.total as f64 * 100.0;
            stats.completion_rate = (rate * 100.0).round() / 100.0;
        }

        stats
    }
}
