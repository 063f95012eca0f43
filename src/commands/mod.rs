//! CLI commands for Tasklens
//!
//! Each command builds a single `FilterSpec` from its arguments and hands
//! it to the filter engine; none of them keep filter state of their own.

pub mod export;
pub mod list;
pub mod prefs;
pub mod stats;

pub use export::{ExportCommand, ExportOutput};
pub use list::{FilterArgs, ListCommand, TaskSummary};
pub use prefs::{PrefsAction, PrefsCommand};
pub use stats::StatsCommand;

use crate::error::AppResult;
use crate::preferences::{JsonFilePreferenceStore, PreferenceStore};
use crate::source::{JsonFileSource, TaskSource};
use chrono::Utc;
use clap::Subcommand;

/// The collaborators a command runs against
#[derive(Debug)]
pub struct AppContext<S = JsonFileSource, P = JsonFilePreferenceStore> {
    /// Where task snapshots come from
    pub source: S,
    /// Where user preferences are kept
    pub preferences: P,
}

impl<S: TaskSource, P: PreferenceStore> AppContext<S, P> {
    pub fn new(source: S, preferences: P) -> Self {
        Self {
            source,
            preferences,
        }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List tasks matching the given filters
    List(ListCommand),
    /// Show dashboard counters
    Stats(StatsCommand),
    /// Export tasks as JSON or CSV
    Export(ExportCommand),
    /// Show or change user preferences
    Prefs(PrefsCommand),
}

impl Command {
    /// Execute the command and render its output.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if loading, validation or writing fails.
    pub async fn execute<S: TaskSource, P: PreferenceStore>(
        &self,
        ctx: &AppContext<S, P>,
    ) -> AppResult<String> {
        match self {
            Command::List(cmd) => {
                let tasks = cmd.execute(ctx).await?;
                Ok(crate::output::format_task_table(&tasks, Utc::now()))
            }
            Command::Stats(cmd) => Ok(cmd.execute(ctx).await?.to_string()),
            Command::Export(cmd) => Ok(cmd.execute(ctx).await?.to_string()),
            Command::Prefs(cmd) => cmd.execute(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::test_utils::MemoryPreferenceStore;
    use crate::source::test_utils::MemorySource;
    use clap::Parser;
    use tasklens_core::{Priority, SortKey, StatusFilter, Task};

    /// Test struct to parse commands
    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        let mut full = vec!["test"];
        full.extend_from_slice(args);
        TestCli::try_parse_from(full).unwrap().command
    }

    #[test]
    fn test_command_list_parses_all_filters() {
        match parse(&[
            "list",
            "--status",
            "active",
            "--priority",
            "high",
            "--search",
            "bug",
            "-t",
            "backend",
            "-t",
            "api",
            "--assignee",
            "u1",
            "--sort",
            "due-date",
            "--limit",
            "5",
        ]) {
            Command::List(cmd) => {
                assert_eq!(cmd.filter.status, Some(StatusFilter::Active));
                assert_eq!(cmd.filter.priority, Some(Priority::High));
                assert_eq!(cmd.filter.search.as_deref(), Some("bug"));
                assert_eq!(cmd.filter.tags, vec!["backend", "api"]);
                assert_eq!(cmd.filter.assignee.as_deref(), Some("u1"));
                assert_eq!(cmd.filter.sort, Some(SortKey::DueDate));
                assert_eq!(cmd.filter.limit, Some(5));
            }
            other => panic!("Expected list command, got {:?}", other),
        }
    }

    #[test]
    fn test_command_list_rejects_unknown_status() {
        let result = TestCli::try_parse_from(["test", "list", "--status", "pending"]);
        let err = result.err().unwrap().to_string();
        assert!(err.contains("invalid status filter 'pending'"));
    }

    #[test]
    fn test_command_list_rejects_zero_limit() {
        assert!(TestCli::try_parse_from(["test", "list", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_command_export_defaults_to_json() {
        match parse(&["export"]) {
            Command::Export(cmd) => {
                assert_eq!(cmd.format, tasklens_core::ExportFormat::Json);
                assert!(cmd.output.is_none());
            }
            other => panic!("Expected export command, got {:?}", other),
        }
    }

    #[test]
    fn test_command_prefs_set_parses_key() {
        match parse(&["prefs", "set", "default-limit", "10"]) {
            Command::Prefs(PrefsCommand {
                action: PrefsAction::Set { key, value },
            }) => {
                assert_eq!(key, crate::preferences::PreferenceKey::DefaultLimit);
                assert_eq!(value, "10");
            }
            other => panic!("Expected prefs set command, got {:?}", other),
        }
    }

    #[test]
    fn test_command_debug() {
        let debug_str = format!("{:?}", parse(&["stats"]));
        assert!(debug_str.contains("Stats"));
    }

    #[tokio::test]
    async fn test_execute_list_renders_table() {
        let ctx = AppContext::new(
            MemorySource::new(vec![
                Task::new("1", "Buy milk").with_priority(Priority::Low),
                Task::new("2", "Ship release").with_priority(Priority::High),
            ]),
            MemoryPreferenceStore::default(),
        );

        let output = parse(&["list", "--sort", "priority"])
            .execute(&ctx)
            .await
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Ship release"));
        assert!(lines[3].contains("Buy milk"));
    }

    #[tokio::test]
    async fn test_execute_list_empty_result() {
        let ctx = AppContext::new(MemorySource::default(), MemoryPreferenceStore::default());
        let output = parse(&["list"]).execute(&ctx).await.unwrap();
        assert_eq!(output, "No tasks found.");
    }

    #[tokio::test]
    async fn test_execute_stats_renders_counts() {
        let ctx = AppContext::new(
            MemorySource::new(vec![Task::new("1", "a"), Task::new("2", "b")]),
            MemoryPreferenceStore::default(),
        );
        let output = parse(&["stats"]).execute(&ctx).await.unwrap();
        assert!(output.contains("Total tasks: 2"));
    }
}
