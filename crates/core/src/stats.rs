//! Dashboard counters over a task snapshot

use crate::models::{Status, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    /// Number of tasks in the snapshot
    pub total: usize,
    /// Tasks with status `done`
    pub completed: usize,
    /// Tasks with status `in_progress`
    pub in_progress: usize,
    /// Tasks past their due date and not done
    pub overdue: usize,
}

impl TaskStats {
    /// Compute counters at the current time.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        Self::from_tasks_at(tasks, Utc::now())
    }

    /// Compute counters with an explicit clock.
    pub fn from_tasks_at<'a>(tasks: impl IntoIterator<Item = &'a Task>, now: DateTime<Utc>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                Status::Done => stats.completed += 1,
                Status::InProgress => stats.in_progress += 1,
                Status::Todo => {}
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Share of tasks that are done, in percent (0 when empty)
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

impl std::fmt::Display for TaskStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total tasks: {}", self.total)?;
        writeln!(f, "Completed:   {} ({}%)", self.completed, self.completion_percent())?;
        writeln!(f, "In progress: {}", self.in_progress)?;
        write!(f, "Overdue:     {}", self.overdue)
    }
}
