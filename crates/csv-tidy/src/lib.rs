//! Goal-table cleanup library.
//!
//! Prepares a goal-coded CSV table for a visualization layer, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! A run loads the table and applies a fixed sequence of stages:
//!
//! - **Fill missing**: every missing cell becomes an empty string
//! - **Normalize headers**: non-word characters are stripped from column names
//! - **Discard columns**: configured columns are removed
//! - **Trim**: surrounding whitespace is removed from text cells
//! - **Blank goals**: rows with an empty goal are dropped or marked `"none"`
//! - **Canonical goals**: digit-only goals are stored with sorted digits
//!
//! It then counts goal values and writes `<name>Clean.csv` next to the input.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use csv_tidy::{CleanerConfig, TableCleaner, render_goal_counts};
//! use std::path::Path;
//!
//! let cleaner = TableCleaner::new(CleanerConfig::default())?;
//! let result = cleaner.run(Path::new("elements.csv"))?;
//!
//! print!("{}", render_goal_counts("Goal", &result.goal_counts));
//! ```
//!
//! # Configuration
//!
//! Dataset knowledge lives in [`CleanerConfig`] rather than in the stages:
//!
//! ```rust,ignore
//! use csv_tidy::config::*;
//!
//! let config = CleanerConfig::builder()
//!     .goal_column("Goal")
//!     .discard_columns(["Array", "Goal1", "Goal2", "Goal3"])
//!     .blank_goals(BlankGoalPolicy::Replace)  // keep rows, write "none"
//!     .column_policy(ColumnPolicy::Lenient)   // skip absent discard columns
//!     .build()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    BlankGoalPolicy, CleanerConfig, CleanerConfigBuilder, ColumnPolicy, ConfigValidationError,
};
pub use error::{CleaningError, ResultExt};
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate, TableCleaner,
    TableCleanerBuilder,
};
pub use reporting::{
    CleaningReport, GoalFrequency, ReportGenerator, goal_frequencies, render_goal_counts,
};
pub use table::{ColumnKind, Table, output_path_for, read_table, write_table};
pub use types::{ActionType, CleaningAction, CleaningResult, CleaningSummary};
pub use utils::{canonical_goal, is_digit_string, normalize_column_name};
