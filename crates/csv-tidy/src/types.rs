use crate::reporting::GoalFrequency;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of a full cleaning run.
#[derive(Debug)]
pub struct CleaningResult {
    /// The cleaned table.
    pub table: Table,
    /// Goal values with their row counts, most frequent first.
    pub goal_counts: Vec<GoalFrequency>,
    /// What the run did to the table.
    pub summary: CleaningSummary,
    /// Where the cleaned table was written, if it was.
    pub output_path: Option<PathBuf>,
}

// ============================================================================
// Cleaning Summary
// ============================================================================

/// Human-readable summary of what the cleaning stages did.
///
/// # Example
///
/// ```rust,ignore
/// let summary: CleaningSummary = result.summary;
/// println!("Kept {} of {} rows in {}ms",
///     summary.rows_after, summary.rows_before, summary.duration_ms);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows after loading.
    pub rows_before: usize,
    /// Number of rows in the cleaned table.
    pub rows_after: usize,

    /// Number of columns after loading.
    pub columns_before: usize,
    /// Number of columns in the cleaned table.
    pub columns_after: usize,

    /// Missing cells replaced by empty strings.
    pub cells_filled: usize,
    /// Cells whose surrounding whitespace was removed.
    pub cells_trimmed: usize,
    /// Rows removed because their goal was blank.
    pub blank_goals_dropped: usize,
    /// Blank goals overwritten with the sentinel.
    pub blank_goals_replaced: usize,
    /// Goal cells rewritten into canonical digit order.
    pub goals_canonicalized: usize,

    /// Columns removed by the discard list.
    pub columns_discarded: Vec<String>,
    /// Discard-list columns that were not present (lenient policy only).
    pub columns_skipped: Vec<String>,
    /// Header renames as `(original, normalized)` pairs.
    pub columns_renamed: Vec<(String, String)>,

    /// List of actions taken during cleaning.
    pub actions: Vec<CleaningAction>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action to the summary.
    pub fn add_action(&mut self, action: CleaningAction) {
        self.actions.push(action);
    }

    /// Number of rows removed during cleaning.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Number of columns removed during cleaning.
    pub fn columns_removed(&self) -> usize {
        self.columns_before.saturating_sub(self.columns_after)
    }
}

/// A single action taken during cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningAction {
    /// Type of action performed.
    pub action_type: ActionType,
    /// Target of the action (column name or "table").
    pub target: String,
    /// Human-readable description of the action.
    pub description: String,
}

impl CleaningAction {
    /// Create a new cleaning action.
    pub fn new(
        action_type: ActionType,
        target: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            target: target.into(),
            description: description.into(),
        }
    }
}

/// Types of actions performed by the cleaning stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Missing cells were filled with empty strings.
    MissingFilled,
    /// A column was renamed.
    ColumnRenamed,
    /// A column was removed from the table.
    ColumnRemoved,
    /// Whitespace was trimmed from text cells.
    WhitespaceTrimmed,
    /// Rows were removed from the table.
    RowsRemoved,
    /// Blank goals were replaced with the sentinel.
    GoalsReplaced,
    /// Goal digit strings were put into canonical order.
    GoalsCanonicalized,
}

impl ActionType {
    /// Get a human-readable display name for the action type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MissingFilled => "Missing Filled",
            Self::ColumnRenamed => "Column Renamed",
            Self::ColumnRemoved => "Column Removed",
            Self::WhitespaceTrimmed => "Whitespace Trimmed",
            Self::RowsRemoved => "Rows Removed",
            Self::GoalsReplaced => "Goals Replaced",
            Self::GoalsCanonicalized => "Goals Canonicalized",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
