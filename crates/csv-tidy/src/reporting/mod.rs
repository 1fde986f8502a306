//! Reporting module for goal summaries and run reports.
//!
//! This module provides:
//! - [`goal_frequencies`]: rows per distinct goal value
//! - [`render_goal_counts`]: console rendering of those counts
//! - [`ReportGenerator`]: JSON run reports

mod frequency;
mod generator;

pub use frequency::{GoalFrequency, goal_frequencies, render_goal_counts};
pub use generator::{CleaningReport, ReportGenerator};
