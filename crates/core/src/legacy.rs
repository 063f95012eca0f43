//! Adapter for task records in the shapes older backends send
//!
//! Older clients disagree on nearly every field: ids are strings or
//! integers, the title is `title` or `text`, completion is a boolean or a
//! `todo`/`in-progress`/`done` status, and priority is a 1..=3 number or a
//! `low`/`medium`/`high` string. `LegacyTask` accepts all of them and
//! `TryFrom<LegacyTask> for Task` maps them onto the canonical model,
//! rejecting anything it cannot map.

use crate::error::{CoreError, CoreResult};
use crate::models::{Priority, Status, Task, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A task id as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyId {
    Number(i64),
    Text(String),
}

/// A priority as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyPriority {
    Level(i64),
    Name(String),
}

/// A task record in any of the supported wire shapes
///
/// Field names are accepted in both camelCase and snake_case so that
/// canonical exports can be read back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTask {
    pub id: LegacyId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<LegacyPriority>,
    #[serde(default, alias = "due_date")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "assigned_to")]
    pub assigned_to: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<String>,
}

impl TryFrom<LegacyTask> for Task {
    type Error = CoreError;

    fn try_from(raw: LegacyTask) -> Result<Self, Self::Error> {
        let id = match raw.id {
            LegacyId::Number(n) => TaskId::from(n),
            LegacyId::Text(s) if s.trim().is_empty() => {
                return Err(CoreError::invalid_field("id", s, "id cannot be empty"));
            }
            LegacyId::Text(s) => TaskId::from(s),
        };

        let title = raw
            .title
            .or(raw.text)
            .ok_or_else(|| CoreError::invalid_field("title", "", "missing both title and text"))?;

        let status = match (raw.status.as_deref(), raw.completed) {
            (Some(s), _) => Status::parse(&s.to_lowercase()).ok_or_else(|| {
                CoreError::invalid_field("status", s, "expected todo, in-progress or done")
            })?,
            (None, Some(true)) => Status::Done,
            (None, Some(false)) | (None, None) => Status::Todo,
        };

        let priority = raw.priority.map(convert_priority).transpose()?.flatten();

        Ok(Task {
            id,
            title,
            description: raw.description,
            status,
            priority,
            due_date: parse_timestamp("dueDate", raw.due_date.as_deref())?,
            tags: raw.tags.unwrap_or_default(),
            assigned_to: raw.assigned_to.filter(|u| !u.is_empty()),
            created_at: parse_timestamp("createdAt", raw.created_at.as_deref())?,
            updated_at: parse_timestamp("updatedAt", raw.updated_at.as_deref())?,
        })
    }
}

/// Convert a wire priority, treating an empty name as "no priority"
fn convert_priority(raw: LegacyPriority) -> CoreResult<Option<Priority>> {
    match raw {
        LegacyPriority::Level(n) => Priority::from_level(n)
            .map(Some)
            .ok_or_else(|| CoreError::invalid_field("priority", n.to_string(), "expected 1, 2 or 3")),
        LegacyPriority::Name(s) if s.trim().is_empty() => Ok(None),
        LegacyPriority::Name(s) => s.parse::<Priority>().map(Some).map_err(|_| {
            CoreError::invalid_field("priority", s, "expected low, medium or high")
        }),
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
///
/// Absent and empty values both yield `None`.
pub fn parse_timestamp(field: &'static str, value: Option<&str>) -> CoreResult<Option<DateTime<Utc>>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| {
            CoreError::invalid_field(field, value, "expected an RFC 3339 timestamp or YYYY-MM-DD")
        })
}
