//! Stats command for the dashboard counters

use super::AppContext;
use crate::error::AppResult;
use crate::preferences::PreferenceStore;
use crate::source::TaskSource;
use clap::Args;
use tasklens_core::{FilterSpec, TaskStats, apply_filters};

/// Show total, completed, in-progress and overdue counts
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Only count tasks assigned to this user id
    #[arg(short, long)]
    pub assignee: Option<String>,
}

impl StatsCommand {
    /// Execute the stats command.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the snapshot cannot be loaded.
    pub async fn execute<S: TaskSource, P: PreferenceStore>(
        &self,
        ctx: &AppContext<S, P>,
    ) -> AppResult<TaskStats> {
        let snapshot = ctx.source.load().await?;

        let mut spec = FilterSpec::new();
        if let Some(ref user_id) = self.assignee {
            spec = spec.assigned_to(user_id);
        }

        Ok(TaskStats::from_tasks(apply_filters(&snapshot.tasks, &spec)))
    }
}
