//! Path resolution for the task snapshot and preferences files
//!
//! Each path is resolved with the same priority:
//! 1. Command line flag
//! 2. Environment variable (if non-empty)
//! 3. Default location

use std::path::PathBuf;
use std::process::Command;

/// Environment variable name for the task snapshot path
pub const TASKS_PATH_ENV: &str = "TL_TASKS_PATH";

/// Environment variable name for the preferences file path
pub const PREFS_PATH_ENV: &str = "TL_PREFS_PATH";

/// Default snapshot path relative to the project root
pub const DEFAULT_TASKS_SUBPATH: &str = ".tasklens/tasks.json";

/// Preferences file path relative to the user config directory
pub const PREFS_SUBPATH: &str = "tasklens/preferences.json";

/// Resolve the task snapshot path.
pub fn resolve_tasks_path(cli_path: Option<PathBuf>) -> PathBuf {
    resolve(cli_path, TASKS_PATH_ENV).unwrap_or_else(default_tasks_path)
}

/// Resolve the preferences file path.
pub fn resolve_prefs_path(cli_path: Option<PathBuf>) -> PathBuf {
    resolve(cli_path, PREFS_PATH_ENV).unwrap_or_else(default_prefs_path)
}

fn resolve(cli_path: Option<PathBuf>, env_var: &str) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var)
        && !env_path.is_empty()
    {
        return Some(PathBuf::from(env_path));
    }

    None
}

/// `<project root>/.tasklens/tasks.json`, or relative to the working
/// directory when not inside a git repository.
pub fn default_tasks_path() -> PathBuf {
    find_project_root()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_TASKS_SUBPATH)
}

/// `<config dir>/tasklens/preferences.json`, falling back to `.tasklens/`
/// in the working directory on platforms without a config directory.
pub fn default_prefs_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(PREFS_SUBPATH),
        None => PathBuf::from(".tasklens/preferences.json"),
    }
}

/// Find the project root by running `git rev-parse --show-toplevel`.
///
/// Returns `None` if not in a git repository or the command fails.
pub fn find_project_root() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;

    if output.status.success() {
        let path_str = String::from_utf8(output.stdout).ok()?;
        Some(PathBuf::from(path_str.trim()))
    } else {
        None
    }
}
