//! Core library for Tasklens
//!
//! Provides the canonical task model, the adapter for legacy backend
//! shapes, and the pure derivations views are built from: the filter
//! engine, dashboard stats, and export renderings. Nothing in this crate
//! performs I/O.

pub mod error;
pub mod export;
pub mod filter;
pub mod legacy;
pub mod models;
pub mod stats;

pub use error::{CoreError, CoreResult};
pub use export::{ExportFormat, to_csv, to_json};
pub use filter::{FilterSpec, SortKey, StatusFilter, apply_filters, apply_filters_at};
pub use legacy::{LegacyTask, parse_timestamp};
pub use models::{Priority, Status, Task, TaskId, User};
pub use stats::TaskStats;
