//! List command for displaying tasks
//!
//! Implements the `tl list` command to display tasks with filtering,
//! sorting and truncation options.

use super::AppContext;
use crate::error::AppResult;
use crate::preferences::{PreferenceStore, parse_limit};
use crate::source::{Snapshot, TaskSource};
use chrono::{DateTime, Utc};
use clap::Args;
use tasklens_core::{
    CoreError, FilterSpec, Priority, SortKey, StatusFilter, Task, apply_filters_at,
};

/// A summary of a task for display in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    /// The task ID
    pub id: String,
    /// Task title
    pub title: String,
    /// Current status
    pub status: String,
    /// Optional priority
    pub priority: Option<String>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the task was overdue when listed
    pub overdue: bool,
    /// Tags for categorization
    pub tags: Vec<String>,
    /// Assignee display name, or raw id when the user is unknown
    pub assignee: Option<String>,
}

impl TaskSummary {
    /// Build a summary, resolving the assignee against the snapshot's users.
    pub fn from_task(task: &Task, snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        TaskSummary {
            id: task.id.to_string(),
            title: task.title.clone(),
            status: task.status.as_str().to_string(),
            priority: task.priority.map(|p| p.as_str().to_string()),
            due_date: task.due_date,
            overdue: task.is_overdue(now),
            tags: task.tags.clone(),
            assignee: task.assigned_to.as_deref().map(|id| {
                snapshot
                    .user_name(id)
                    .map_or_else(|| id.to_string(), str::to_string)
            }),
        }
    }
}

/// Filter options shared by commands that derive a view of tasks
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Filter by status: all, active, completed, in_progress, overdue, high_priority
    #[arg(short, long, value_parser = parse_status_filter)]
    pub status: Option<StatusFilter>,

    /// Filter by priority: low, medium, high
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// Search text in titles (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by tag (can be specified multiple times, matches any)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Filter by assignee user id
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Sort by: due_date, priority, title
    #[arg(long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Maximum number of tasks to show
    #[arg(short = 'n', long, value_parser = parse_limit_arg)]
    pub limit: Option<usize>,
}

/// Parse a status filter string into a StatusFilter enum
pub(crate) fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

/// Parse a priority string into a Priority enum
pub(crate) fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

/// Parse a sort key string into a SortKey enum
pub(crate) fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

/// Parse a positive limit
pub(crate) fn parse_limit_arg(s: &str) -> Result<usize, String> {
    parse_limit(s).map_err(|e| e.to_string())
}

impl FilterArgs {
    /// Build a FilterSpec from the command options.
    pub fn build_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new().with_tags(self.tags.iter().cloned());

        if let Some(status) = self.status {
            spec = spec.with_status(status);
        }

        if let Some(priority) = self.priority {
            spec = spec.with_priority(priority);
        }

        if let Some(ref search) = self.search {
            spec = spec.with_search(search);
        }

        if let Some(ref user_id) = self.assignee {
            spec = spec.assigned_to(user_id);
        }

        if let Some(key) = self.sort {
            spec = spec.sort_by(key);
        }

        if let Some(limit) = self.limit {
            spec = spec.with_limit(limit);
        }

        spec
    }
}

/// List tasks with optional filters
#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub filter: FilterArgs,
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Loads the complete snapshot, applies the filters (falling back to
    /// the stored default sort and limit), and returns task summaries in
    /// display order.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the snapshot or preferences cannot be loaded.
    pub async fn execute<S: TaskSource, P: PreferenceStore>(
        &self,
        ctx: &AppContext<S, P>,
    ) -> AppResult<Vec<TaskSummary>> {
        let prefs = ctx.preferences.load()?;
        let snapshot = ctx.source.load().await?;

        let mut spec = self.filter.build_spec();
        if spec.sort.is_none() {
            spec.sort = prefs.default_sort;
        }
        if spec.limit.is_none() {
            spec.limit = prefs.default_limit;
        }

        let now = Utc::now();
        let tasks = apply_filters_at(&snapshot.tasks, &spec, now);

        Ok(tasks
            .into_iter()
            .map(|task| TaskSummary::from_task(task, &snapshot, now))
            .collect())
    }
}
