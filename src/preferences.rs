//! User preference storage
//!
//! Preferences are a small JSON blob kept in the user config directory.
//! A missing file means defaults; so does a corrupt one, after a warning.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tasklens_core::{CoreError, SortKey};

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(CoreError::ParseEnum {
                kind: "theme",
                value: s.to_string(),
                expected: "light, dark",
            }),
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub theme: Theme,
    pub language: String,
    pub notifications_enabled: bool,
    /// Sort applied by `list` and `export` when none is given
    pub default_sort: Option<SortKey>,
    /// Limit applied by `list` when none is given
    pub default_limit: Option<usize>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "en".to_string(),
            notifications_enabled: true,
            default_sort: None,
            default_limit: None,
        }
    }
}

/// A settable preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Theme,
    Language,
    Notifications,
    DefaultSort,
    DefaultLimit,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 5] = [
        PreferenceKey::Theme,
        PreferenceKey::Language,
        PreferenceKey::Notifications,
        PreferenceKey::DefaultSort,
        PreferenceKey::DefaultLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::Theme => "theme",
            PreferenceKey::Language => "language",
            PreferenceKey::Notifications => "notifications",
            PreferenceKey::DefaultSort => "default-sort",
            PreferenceKey::DefaultLimit => "default-limit",
        }
    }
}

impl FromStr for PreferenceKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "theme" => Ok(PreferenceKey::Theme),
            "language" => Ok(PreferenceKey::Language),
            "notifications" => Ok(PreferenceKey::Notifications),
            "default-sort" => Ok(PreferenceKey::DefaultSort),
            "default-limit" => Ok(PreferenceKey::DefaultLimit),
            _ => Err(CoreError::ParseEnum {
                kind: "preference",
                value: s.to_string(),
                expected: "theme, language, notifications, default-sort, default-limit",
            }),
        }
    }
}

/// Sentinel value that clears an optional preference
const NONE_VALUE: &str = "none";

impl UserPreferences {
    /// Current value of a preference as text
    pub fn get(&self, key: PreferenceKey) -> String {
        match key {
            PreferenceKey::Theme => self.theme.as_str().to_string(),
            PreferenceKey::Language => self.language.clone(),
            PreferenceKey::Notifications => self.notifications_enabled.to_string(),
            PreferenceKey::DefaultSort => self
                .default_sort
                .map_or_else(|| NONE_VALUE.to_string(), |s| s.to_string()),
            PreferenceKey::DefaultLimit => self
                .default_limit
                .map_or_else(|| NONE_VALUE.to_string(), |l| l.to_string()),
        }
    }

    /// Set a preference from text.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Core` for an unknown theme or sort key and
    /// `AppError::Validation` for any other unparsable value.
    pub fn set(&mut self, key: PreferenceKey, value: &str) -> AppResult<()> {
        let value = value.trim();
        match key {
            PreferenceKey::Theme => self.theme = value.parse()?,
            PreferenceKey::Language => {
                if value.is_empty() {
                    return Err(AppError::Validation {
                        message: "Language cannot be empty".to_string(),
                    });
                }
                self.language = value.to_string();
            }
            PreferenceKey::Notifications => {
                self.notifications_enabled = parse_bool(value).ok_or_else(|| AppError::Validation {
                    message: format!("invalid notifications value '{}'. Valid values: on, off", value),
                })?;
            }
            PreferenceKey::DefaultSort => {
                self.default_sort = if value.eq_ignore_ascii_case(NONE_VALUE) {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            PreferenceKey::DefaultLimit => {
                self.default_limit = if value.eq_ignore_ascii_case(NONE_VALUE) {
                    None
                } else {
                    Some(parse_limit(value)?)
                };
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a positive result limit
pub fn parse_limit(value: &str) -> AppResult<usize> {
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(AppError::Validation {
            message: format!("invalid limit '{}'. Expected a positive integer", value),
        }),
    }
}

/// Storage for user preferences
pub trait PreferenceStore {
    /// Load preferences, falling back to defaults when none are stored.
    fn load(&self) -> AppResult<UserPreferences>;

    /// Persist preferences.
    fn save(&self, prefs: &UserPreferences) -> AppResult<()>;
}

/// Preference store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> AppResult<UserPreferences> {
        if !self.path.exists() {
            return Ok(UserPreferences::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| AppError::Preferences {
            path: self.path.clone(),
            source: e,
        })?;

        match serde_json::from_str::<UserPreferences>(&contents) {
            Ok(mut prefs) => {
                if prefs.default_limit == Some(0) {
                    tracing::warn!(
                        path = %self.path.display(),
                        "ignoring stored default limit of 0"
                    );
                    prefs.default_limit = None;
                }
                Ok(prefs)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring unreadable preferences file"
                );
                Ok(UserPreferences::default())
            }
        }
    }

    fn save(&self, prefs: &UserPreferences) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(prefs).map_err(CoreError::from)?;
        std::fs::write(&self.path, json).map_err(|e| AppError::Preferences {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
