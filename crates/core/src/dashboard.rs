//! Dashboard aggregates: headline counts and the "recent tasks" strip.

use serde::Serialize;

use crate::models::personnel::Personnel;
use crate::models::task::Task;
use crate::types::Timestamp;

/// Number of tasks shown in the "recent" section.
pub const RECENT_TASKS_LIMIT: usize = 5;

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_personnel: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
}

impl DashboardStats {
    pub fn compute(personnel: &[Personnel], tasks: &[Task]) -> Self {
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        Self {
            total_personnel: personnel.len(),
            total_tasks: tasks.len(),
            completed_tasks,
            pending_tasks: tasks.len() - completed_tasks,
        }
    }

    /// Completed share in `[0.0, 1.0]`; `0.0` when there are no tasks.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f64 / self.total_tasks as f64
        }
    }
}

/// The `limit` most recently created tasks, newest first.
///
/// Tasks without a parsable creation time sort as the epoch. Ties keep
/// their input order.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(created_or_epoch(t)));
    sorted.into_iter().take(limit).cloned().collect()
}

fn created_or_epoch(task: &Task) -> Timestamp {
    task.created_at_ts().unwrap_or(Timestamp::UNIX_EPOCH)
}
