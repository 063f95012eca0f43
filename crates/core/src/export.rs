//! JSON and CSV renderings of a task sequence

use crate::error::{CoreError, CoreResult};
use crate::models::Task;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{Terminator, WriterBuilder};
use std::str::FromStr;

/// Output format for exported tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    /// Returns the string representation used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Render tasks in this format
    pub fn render(&self, tasks: &[&Task]) -> CoreResult<String> {
        match self {
            ExportFormat::Json => to_json(tasks),
            ExportFormat::Csv => to_csv(tasks),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(CoreError::ParseEnum {
                kind: "export format",
                value: s.to_string(),
                expected: "json, csv",
            }),
        }
    }
}

/// Column headers for CSV export
const CSV_HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Status",
    "Priority",
    "Due Date",
    "Tags",
    "Created At",
];

/// Serialize tasks as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns `CoreError::Serialize` if serialization fails.
pub fn to_json(tasks: &[&Task]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Render tasks as CSV with a header row.
///
/// Records end in `\n`; the last record has no terminator. Fields holding
/// a separator, quote or line break are quoted.
///
/// # Errors
///
/// Returns `CoreError::Csv` if a record cannot be written.
pub fn to_csv(tasks: &[&Task]) -> CoreResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for task in tasks {
        writer.write_record([
            task.id.as_str(),
            task.title.as_str(),
            task.status.as_str(),
            task.priority.map(|p| p.as_str()).unwrap_or_default(),
            format_timestamp(task.due_date).as_str(),
            task.tags.join(";").as_str(),
            format_timestamp(task.created_at).as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut rendered = String::from_utf8_lossy(&bytes).into_owned();
    if rendered.ends_with('\n') {
        rendered.pop();
    }
    Ok(rendered)
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Status};
    use chrono::TimeZone;

    fn sample() -> Vec<Task> {
        vec![
            Task::new("1", "Buy milk")
                .with_priority(Priority::Low)
                .with_due_date(Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap())
                .with_tags(["home", "errand"]),
            Task::new("2", "Say \"hi\", then leave").with_status(Status::Done),
        ]
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid export format 'xml'. Valid values: json, csv"
        );
    }

    #[test]
    fn test_to_csv_header_only_when_empty() {
        assert_eq!(to_csv(&[]).unwrap(), "ID,Title,Status,Priority,Due Date,Tags,Created At");
    }

    #[test]
    fn test_to_csv_rows() {
        let tasks = sample();
        let view: Vec<&Task> = tasks.iter().collect();
        let csv = to_csv(&view).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,Buy milk,todo,low,2024-06-01T09:30:00Z,home;errand,");
        assert_eq!(lines[2], "2,\"Say \"\"hi\"\", then leave\",done,,,,");
    }

    #[test]
    fn test_to_csv_quotes_separators_and_line_breaks() {
        let tasks = vec![
            Task::new("a", "plain"),
            Task::new("b", "a,b"),
            Task::new("c", "line\nbreak"),
        ];
        let view: Vec<&Task> = tasks.iter().collect();
        let csv = to_csv(&view).unwrap();

        assert!(csv.contains("\na,plain,todo,,,,"));
        assert!(csv.contains("\nb,\"a,b\",todo,,,,"));
        assert!(csv.contains("\nc,\"line\nbreak\",todo,,,,"));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_to_json_is_array_of_canonical_tasks() {
        let tasks = sample();
        let view: Vec<&Task> = tasks.iter().collect();
        let json = to_json(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "1");
        assert_eq!(items[0]["priority"], "low");
        assert_eq!(items[1]["status"], "done");
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let tasks = sample();
        let view: Vec<&Task> = tasks.iter().take(1).collect();
        assert!(ExportFormat::Csv.render(&view).unwrap().starts_with("ID,Title"));
        assert!(ExportFormat::Json.render(&view).unwrap().starts_with('['));
    }
}
