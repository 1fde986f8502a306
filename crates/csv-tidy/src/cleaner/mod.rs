//! Cleaning stages applied to a loaded table.
//!
//! This module provides functionality for:
//! - Filling missing cells with empty strings
//! - Normalizing column names and discarding unused columns
//! - Trimming whitespace from text cells
//! - Dropping or marking blank goals
//! - Canonicalizing digit-string goals
//!
//! Each stage takes the table by mutable reference and either completes or
//! returns an error; the pipeline in [`crate::pipeline`] runs them in order.

mod columns;
mod goals;
mod sanitizers;

pub use columns::{discard_columns, normalize_column_names};
pub use goals::{BlankGoalOutcome, canonicalize_goals, normalize_blank_goals};
pub use sanitizers::{fill_missing, trim_text_columns};
