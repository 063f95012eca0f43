//! Prefs command for reading and changing user preferences

use super::AppContext;
use crate::error::AppResult;
use crate::output::format_preferences;
use crate::preferences::{PreferenceKey, PreferenceStore, UserPreferences};
use crate::source::TaskSource;
use clap::{Args, Subcommand};
use tasklens_core::CoreError;

fn parse_key(s: &str) -> Result<PreferenceKey, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

/// Show or change user preferences
#[derive(Debug, Args)]
pub struct PrefsCommand {
    #[command(subcommand)]
    pub action: PrefsAction,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// Print every preference
    Show,
    /// Change one preference (use "none" to clear default-sort or default-limit)
    Set {
        /// theme, language, notifications, default-sort, default-limit
        #[arg(value_parser = parse_key)]
        key: PreferenceKey,
        /// New value
        value: String,
    },
    /// Restore the defaults
    Reset,
}

impl PrefsCommand {
    /// Execute the prefs command and describe the result.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the value is invalid or the store cannot be
    /// written.
    pub fn execute<S: TaskSource, P: PreferenceStore>(
        &self,
        ctx: &AppContext<S, P>,
    ) -> AppResult<String> {
        match &self.action {
            PrefsAction::Show => Ok(format_preferences(&ctx.preferences.load()?)),
            PrefsAction::Set { key, value } => {
                let mut prefs = ctx.preferences.load()?;
                prefs.set(*key, value)?;
                ctx.preferences.save(&prefs)?;
                Ok(format!("Set {} to {}", key.as_str(), prefs.get(*key)))
            }
            PrefsAction::Reset => {
                ctx.preferences.save(&UserPreferences::default())?;
                Ok("Preferences reset to defaults".to_string())
            }
        }
    }
}
