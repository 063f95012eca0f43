//! Output formatting module for Tasklens
//!
//! Provides table formatting and small text helpers for CLI output.

use crate::commands::list::TaskSummary;
use crate::preferences::{PreferenceKey, UserPreferences};
use chrono::{DateTime, Utc};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 30;

/// Maximum width for the tags column before truncation
const MAX_TAGS_WIDTH: usize = 20;

/// Placeholder shown for absent values
const EMPTY_CELL: &str = "-";

/// Truncate a string to the specified maximum width in characters,
/// adding an ellipsis if needed.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

/// Capitalize the first character of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Describe how long ago `date` was relative to `now`.
///
/// Produces "just now", "1 minute ago", "3 hours ago", "2 days ago".
/// Dates in the future are reported as "just now".
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(date);

    let (amount, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_string();
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

/// Format tags as a comma-separated string.
fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        tags.join(", ")
    }
}

/// Format a due date as `YYYY-MM-DD`, noting how long ago it passed when
/// the task is overdue.
fn format_due(task: &TaskSummary, now: DateTime<Utc>) -> String {
    match task.due_date {
        None => EMPTY_CELL.to_string(),
        Some(due) if task.overdue => {
            format!("{} ({})", due.format("%Y-%m-%d"), format_relative_time(due, now))
        }
        Some(due) => due.format("%Y-%m-%d").to_string(),
    }
}

/// Format tasks into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID  Status       Priority  Due         Title          Tags     Assignee
/// --  -----------  --------  ----------  -------------  -------  --------
/// t1  in_progress  high      2024-06-30  Ship release   backend  Ada
/// ```
///
/// # Arguments
///
/// * `tasks` - Slice of task summaries to format
/// * `now` - Instant used to describe overdue dates
///
/// # Returns
///
/// A formatted string containing the table, or an empty result message if no tasks.
pub fn format_task_table(tasks: &[TaskSummary], now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Status", "Priority", "Due", "Title", "Tags", "Assignee"];

    let rows: Vec<[String; 7]> = tasks
        .iter()
        .map(|task| {
            [
                task.id.clone(),
                task.status.clone(),
                task.priority.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
                format_due(task, now),
                truncate(&task.title, MAX_TITLE_WIDTH),
                truncate(&format_tags(&task.tags), MAX_TAGS_WIDTH),
                task.assignee
                    .clone()
                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
            ]
        })
        .collect();

    // Column widths based on content
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.iter().map(|h| h.to_string()), &widths));
    lines.push(format_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in rows {
        lines.push(format_row(row.into_iter(), &widths));
    }

    lines.join("\n")
}

/// Pad each cell to its column width and join with two spaces.
fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Format preferences as `Key: value` lines.
pub fn format_preferences(prefs: &UserPreferences) -> String {
    PreferenceKey::ALL
        .iter()
        .map(|key| format!("{}: {}", capitalize_first(key.as_str()), prefs.get(*key)))
        .collect::<Vec<_>>()
        .join("\n")
}
