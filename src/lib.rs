//! Tasklens command line application
//!
//! Loads a task snapshot, derives views of it through the
//! `tasklens-core` filter engine, and renders them for the terminal.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod preferences;
pub mod source;

pub use error::{AppError, AppResult};
