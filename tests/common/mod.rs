//! Test infrastructure for integration tests
//!
//! Provides isolated snapshot and preference files plus command builders.
//! Each test gets its own temp directory so no state is shared.

use serde_json::{Value, json};
use std::path::PathBuf;
use tasklens::commands::{AppContext, ExportCommand, FilterArgs, ListCommand, StatsCommand};
use tasklens::preferences::JsonFilePreferenceStore;
use tasklens::source::JsonFileSource;
use tasklens_core::ExportFormat;

/// Test context owning a temp directory with a snapshot and preferences file
pub struct TestContext {
    pub temp_dir: PathBuf,
    pub app: AppContext<JsonFileSource, JsonFilePreferenceStore>,
}

impl TestContext {
    /// Create a context whose snapshot file holds `snapshot`.
    ///
    /// The temp directory name combines process ID, thread ID and a
    /// nanosecond timestamp so contexts never collide.
    pub fn new(snapshot: &Value) -> Self {
        Self::with_contents(&snapshot.to_string())
    }

    /// Create a context whose snapshot file holds raw `contents`.
    pub fn with_contents(contents: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "tl-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        let tasks_path = temp_dir.join("tasks.json");
        std::fs::write(&tasks_path, contents).unwrap();

        let app = AppContext::new(
            JsonFileSource::new(&tasks_path),
            JsonFilePreferenceStore::new(temp_dir.join("config").join("preferences.json")),
        );

        Self { temp_dir, app }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.join(name)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Snapshot Fixtures
// =============================================================================

/// A mixed snapshot in the document form, with records in several backend
/// shapes (numeric ids, `text`, `completed`, numeric priorities).
pub fn mixed_snapshot() -> Value {
    json!({
        "tasks": [
            {"id": 1, "text": "Buy milk", "completed": false, "priority": 1, "tags": ["home"]},
            {"id": "t2", "title": "Ship release", "status": "done", "priority": "high",
             "tags": ["work"], "createdAt": "2024-05-01T09:00:00Z"},
            {"id": "t3", "title": "Fix login bug", "status": "in-progress", "priority": 3,
             "tags": ["work", "backend"], "assignedTo": "u1", "dueDate": "2001-01-01"},
            {"id": "t4", "title": "Plan offsite", "status": "todo", "priority": "medium",
             "tags": ["team"], "assignedTo": "u2", "dueDate": "2999-06-30T12:00:00Z"},
            {"id": 5, "text": "Water plants", "completed": true}
        ],
        "users": [
            {"id": "u1", "name": "Ada", "email": "ada@example.com"}
        ]
    })
}

/// Fifteen high priority tasks due on consecutive days, listed in reverse.
pub fn fifteen_high_priority() -> Value {
    let tasks: Vec<Value> = (1..=15)
        .rev()
        .map(|day| {
            json!({
                "id": format!("h{:02}", day),
                "title": format!("Task {:02}", day),
                "status": "todo",
                "priority": "high",
                "dueDate": format!("2999-01-{:02}", day),
            })
        })
        .collect();
    Value::Array(tasks)
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create a list command with the given filters.
pub fn list_cmd(filter: FilterArgs) -> ListCommand {
    ListCommand { filter }
}

/// Create a stats command.
pub fn stats_cmd(assignee: Option<&str>) -> StatsCommand {
    StatsCommand {
        assignee: assignee.map(String::from),
    }
}

/// Create an export command.
pub fn export_cmd(format: ExportFormat, output: Option<PathBuf>) -> ExportCommand {
    ExportCommand {
        format,
        output,
        filter: FilterArgs::default(),
    }
}
