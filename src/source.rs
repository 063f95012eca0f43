//! Loading complete task snapshots
//!
//! A snapshot is read in full and converted to the canonical model before
//! any view runs the filter engine over it. The file holds either a bare
//! array of task records or a document of the form
//! `{ "tasks": [...], "users": [...] }`.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use tasklens_core::{LegacyTask, Task, User};

/// A complete, converted set of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
}

impl Snapshot {
    /// Look up a user's display name by id
    pub fn user_name(&self, user_id: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.as_str())
    }
}

/// Something that can produce a complete task snapshot
pub trait TaskSource {
    /// Load every task and user record.
    fn load(&self) -> impl Future<Output = AppResult<Snapshot>> + Send;
}

/// Task source backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskSource for JsonFileSource {
    async fn load(&self) -> AppResult<Snapshot> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| AppError::ReadSnapshot {
                    path: self.path.clone(),
                    source: e,
                })?;

        let snapshot = parse_snapshot(&self.path, &contents)?;

        tracing::info!(
            path = %self.path.display(),
            tasks = snapshot.tasks.len(),
            users = snapshot.users.len(),
            "loaded task snapshot"
        );

        Ok(snapshot)
    }
}

/// Document form of a snapshot file
#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    tasks: Vec<Value>,
    #[serde(default)]
    users: Vec<User>,
}

/// Parse snapshot file contents.
///
/// Records are converted one at a time so that errors name the index of
/// the first offending record.
///
/// # Errors
///
/// Returns `AppError::ParseSnapshot` if the contents are not a task array
/// or snapshot document, `AppError::MalformedRecord` if a record has the
/// wrong shape, and `AppError::InvalidRecord` if a record carries a value
/// the model rejects.
pub fn parse_snapshot(path: &Path, contents: &str) -> AppResult<Snapshot> {
    let parse_err = |e| AppError::ParseSnapshot {
        path: path.to_path_buf(),
        source: e,
    };

    let document = match serde_json::from_str::<Value>(contents).map_err(parse_err)? {
        Value::Array(tasks) => SnapshotDocument {
            tasks,
            users: Vec::new(),
        },
        other => serde_json::from_value::<SnapshotDocument>(other).map_err(parse_err)?,
    };

    let tasks = document
        .tasks
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw: LegacyTask = serde_json::from_value(value)
                .map_err(|source| AppError::MalformedRecord { index, source })?;
            Task::try_from(raw).map_err(|source| AppError::InvalidRecord { index, source })
        })
        .collect::<AppResult<Vec<Task>>>()?;

    Ok(Snapshot {
        tasks,
        users: document.users,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tasklens_core::{Priority, Status};

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "tl-source-test-{}-{}-{:?}-{}.json",
            name,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn test_parse_bare_array() {
        let snapshot = parse_snapshot(
            Path::new("tasks.json"),
            r#"[{"id":1,"text":"Buy milk","completed":false,"priority":1}]"#,
        )
        .unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].priority, Some(Priority::Low));
        assert!(snapshot.users.is_empty());
    }

    #[test]
    fn test_parse_negative_integer_id() {
        let snapshot =
            parse_snapshot(Path::new("tasks.json"), r#"[{"id":-3,"title":"x"}]"#).unwrap();
        assert_eq!(snapshot.tasks[0].id.as_str(), "-3");
    }

    #[test]
    fn test_parse_document_with_users() {
        let snapshot = parse_snapshot(
            Path::new("tasks.json"),
            r#"{
                "tasks": [{"id":"t1","title":"Review","status":"in-progress","assignedTo":"u1"}],
                "users": [{"id":"u1","name":"Ada","email":"ada@example.com","apiToken":"x"}]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.tasks[0].status, Status::InProgress);
        assert_eq!(snapshot.user_name("u1"), Some("Ada"));
        assert_eq!(snapshot.user_name("u2"), None);
    }

    #[test]
    fn test_parse_empty_document() {
        let snapshot = parse_snapshot(Path::new("tasks.json"), "{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_snapshot(Path::new("tasks.json"), "not json").unwrap_err();
        assert!(matches!(err, AppError::ParseSnapshot { .. }));
    }

    #[test]
    fn test_parse_reports_index_of_malformed_record() {
        let err = parse_snapshot(
            Path::new("tasks.json"),
            r#"[{"id":"a","title":"ok"},{"title":"no id"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_parse_reports_index_of_invalid_record() {
        let err = parse_snapshot(
            Path::new("tasks.json"),
            r#"[{"id":"a","title":"ok"},{"id":"b","title":"x"},{"id":"c","title":"y","priority":7}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord { index: 2, .. }));
    }

    #[tokio::test]
    async fn test_json_file_source_loads_file() {
        let path = temp_path("load");
        std::fs::write(&path, r#"[{"id":"a","title":"From disk"}]"#).unwrap();

        let snapshot = JsonFileSource::new(&path).load().await.unwrap();
        assert_eq!(snapshot.tasks[0].title, "From disk");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let path = temp_path("missing");
        let err = JsonFileSource::new(&path).load().await.unwrap_err();
        match err {
            AppError::ReadSnapshot { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected ReadSnapshot error, got {:?}", other),
        }
    }
}
