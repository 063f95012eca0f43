//! Task filtering, sorting and truncation
//!
//! Provides a builder-pattern `FilterSpec` and the pure `apply_filters`
//! engine that derives the displayed subset of a task snapshot.
//!
//! All predicates use AND semantics across criteria. Within the tag
//! criterion OR semantics apply (a task must carry at least one of the
//! listed tags).

use crate::error::CoreError;
use crate::models::{Priority, Status, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Status-like filter applied before any other criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No constraint
    #[default]
    All,
    /// Tasks that are not done
    Active,
    /// Tasks that are done
    Completed,
    /// Tasks whose status is `in_progress`
    InProgress,
    /// Tasks past their due date that are not done
    Overdue,
    /// Tasks with `high` priority
    HighPriority,
}

impl StatusFilter {
    /// Returns the string representation used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
            StatusFilter::InProgress => "in_progress",
            StatusFilter::Overdue => "overdue",
            StatusFilter::HighPriority => "high_priority",
        }
    }

    /// Check a single task against this filter at the given instant
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.is_completed(),
            StatusFilter::Completed => task.is_completed(),
            StatusFilter::InProgress => task.status == Status::InProgress,
            StatusFilter::Overdue => task.is_overdue(now),
            StatusFilter::HighPriority => task.priority == Some(Priority::High),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            "in_progress" => Ok(StatusFilter::InProgress),
            "overdue" => Ok(StatusFilter::Overdue),
            "high_priority" => Ok(StatusFilter::HighPriority),
            _ => Err(CoreError::ParseEnum {
                kind: "status filter",
                value: s.to_string(),
                expected: "all, active, completed, in_progress, overdue, high_priority",
            }),
        }
    }
}

/// Key used to order the filtered tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Earliest due date first, undated tasks last
    DueDate,
    /// Highest priority first, tasks without priority last
    Priority,
    /// Alphabetical by title, ignoring case
    Title,
}

impl SortKey {
    /// Returns the string representation used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "due_date",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }

    /// Compare two tasks under this key
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => missing_last(a.due_date.as_ref(), b.due_date.as_ref(), |x, y| {
                x.cmp(y)
            }),
            SortKey::Priority => {
                missing_last(a.priority.as_ref(), b.priority.as_ref(), |x, y| y.cmp(x))
            }
            SortKey::Title => compare_titles(&a.title, &b.title),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "due_date" | "duedate" | "due" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "title" => Ok(SortKey::Title),
            _ => Err(CoreError::ParseEnum {
                kind: "sort key",
                value: s.to_string(),
                expected: "due_date, priority, title",
            }),
        }
    }
}

/// Order two optional keys, placing `None` after every `Some`
fn missing_last<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive title collation, falling back to the raw strings so
/// that titles differing only in case still have a fixed order.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Filter criteria for deriving a view of tasks
///
/// Every field defaults to "no constraint". Sorting and truncation ride
/// along but do not count as active filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Status-like filter
    #[serde(default)]
    pub status: StatusFilter,
    /// Exact priority match
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Case-insensitive substring matched against the title
    #[serde(default)]
    pub search_query: String,
    /// Tags (OR semantics)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Exact assignee match
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Ordering applied after filtering
    #[serde(default)]
    pub sort: Option<SortKey>,
    /// Maximum number of results, applied after sorting
    #[serde(default)]
    pub limit: Option<usize>,
}

impl FilterSpec {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status filter
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set the priority to match
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the search query
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Add a tag to filter by
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to filter by
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Filter to tasks assigned to a specific user
    pub fn assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    /// Set the sort key
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Cap the number of results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether any predicate narrows the result set
    pub fn has_active_filters(&self) -> bool {
        self.status != StatusFilter::All
            || self.priority.is_some()
            || self.normalized_query().is_some()
            || !self.tags.is_empty()
            || self.assigned_to.is_some()
    }

    /// Return every criterion to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The trimmed, lowercased search query, or `None` when blank
    fn normalized_query(&self) -> Option<String> {
        let trimmed = self.search_query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    /// Check a single task against every predicate
    fn matches(&self, task: &Task, query: Option<&str>, now: DateTime<Utc>) -> bool {
        if !self.status.matches(task, now) {
            return false;
        }

        if let Some(priority) = self.priority
            && task.priority != Some(priority)
        {
            return false;
        }

        if let Some(query) = query
            && !task.title.to_lowercase().contains(query)
        {
            return false;
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.has_tag(t)) {
            return false;
        }

        if let Some(ref user_id) = self.assigned_to
            && task.assigned_to.as_ref() != Some(user_id)
        {
            return false;
        }

        true
    }
}

static_assertions::assert_impl_all!(FilterSpec: Send, Sync);

/// Apply a filter spec to a snapshot of tasks, evaluated at the current time.
///
/// See [`apply_filters_at`].
pub fn apply_filters<'a>(tasks: &'a [Task], spec: &FilterSpec) -> Vec<&'a Task> {
    apply_filters_at(tasks, spec, Utc::now())
}

/// Apply a filter spec to a snapshot of tasks.
///
/// Filters first, then stable-sorts by the sort key (if any), then
/// truncates to the limit. The input is never reordered; the result
/// borrows the matching tasks in their derived order.
///
/// # Arguments
///
/// * `tasks` - The complete task snapshot
/// * `spec` - The filter criteria
/// * `now` - Instant used for the overdue predicate
pub fn apply_filters_at<'a>(
    tasks: &'a [Task],
    spec: &FilterSpec,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let query = spec.normalized_query();

    let mut result: Vec<&Task> = tasks
        .iter()
        .filter(|task| spec.matches(task, query.as_deref(), now))
        .collect();
    let matched = result.len();

    if let Some(key) = spec.sort {
        result.sort_by(|a, b| key.compare(a, b));
    }

    if let Some(limit) = spec.limit {
        result.truncate(limit);
    }

    tracing::debug!(
        input = tasks.len(),
        matched,
        returned = result.len(),
        "applied task filters"
    );

    result
}
