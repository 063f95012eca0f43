//! Export command for writing filtered tasks as JSON or CSV

use super::AppContext;
use super::list::FilterArgs;
use crate::error::{AppError, AppResult};
use crate::preferences::PreferenceStore;
use crate::source::TaskSource;
use clap::Args;
use std::fmt;
use std::path::PathBuf;
use tasklens_core::{CoreError, ExportFormat, apply_filters};

/// Parse an export format string into an ExportFormat enum
fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

/// Export tasks in a machine-readable format
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output format: json, csv
    #[arg(short, long, default_value = "json", value_parser = parse_format)]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Where exported data went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    /// Rendered document for stdout
    Stdout(String),
    /// Document was written to a file
    File { path: PathBuf, tasks: usize },
}

impl fmt::Display for ExportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportOutput::Stdout(rendered) => write!(f, "{}", rendered),
            ExportOutput::File { path, tasks } => {
                write!(f, "Exported {} tasks to {}", tasks, path.display())
            }
        }
    }
}

impl ExportCommand {
    /// Execute the export command.
    ///
    /// Exports are never truncated by the stored default limit; only the
    /// stored default sort applies when `--sort` is not given.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if loading, rendering or writing fails.
    pub async fn execute<S: TaskSource, P: PreferenceStore>(
        &self,
        ctx: &AppContext<S, P>,
    ) -> AppResult<ExportOutput> {
        let prefs = ctx.preferences.load()?;
        let snapshot = ctx.source.load().await?;

        let mut spec = self.filter.build_spec();
        if spec.sort.is_none() {
            spec.sort = prefs.default_sort;
        }

        let tasks = apply_filters(&snapshot.tasks, &spec);
        let rendered = self.format.render(&tasks)?;

        let Some(path) = &self.output else {
            return Ok(ExportOutput::Stdout(rendered));
        };

        tokio::fs::write(path, rendered)
            .await
            .map_err(|e| AppError::Write {
                path: path.clone(),
                source: e,
            })?;

        tracing::info!(
            path = %path.display(),
            format = %self.format,
            tasks = tasks.len(),
            "exported tasks"
        );

        Ok(ExportOutput::File {
            path: path.clone(),
            tasks: tasks.len(),
        })
    }
}
