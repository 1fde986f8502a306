//! Goal column normalization.
//!
//! A goal cell holds a set of category codes written as a digit string.
//! Blank cells are either dropped or marked with a sentinel, and digit
//! strings are rewritten in sorted order so permutations of the same code
//! set compare equal.

use crate::config::BlankGoalPolicy;
use crate::error::Result;
use crate::table::Table;
use crate::utils::canonical_goal;
use tracing::debug;

/// Outcome of [`normalize_blank_goals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlankGoalOutcome {
    /// Rows removed.
    pub dropped: usize,
    /// Cells overwritten with the sentinel.
    pub replaced: usize,
}

/// Drop or mark rows whose goal cell is empty.
///
/// Missing cells count as empty.
pub fn normalize_blank_goals(
    table: &mut Table,
    goal_column: &str,
    policy: BlankGoalPolicy,
    sentinel: &str,
) -> Result<BlankGoalOutcome> {
    let blank: Vec<bool> = table
        .text_column(goal_column)?
        .into_iter()
        .map(|v| v.is_none_or(str::is_empty))
        .collect();
    let blank_count = blank.iter().filter(|b| **b).count();

    if blank_count == 0 {
        debug!("No blank goals in '{}'", goal_column);
        return Ok(BlankGoalOutcome::default());
    }

    match policy {
        BlankGoalPolicy::Drop => {
            let keep: Vec<bool> = blank.iter().map(|b| !b).collect();
            table.retain_rows(&keep)?;
            debug!("Dropped {} rows with blank goals", blank_count);
            Ok(BlankGoalOutcome {
                dropped: blank_count,
                replaced: 0,
            })
        }
        BlankGoalPolicy::Replace => {
            let values: Vec<String> = table
                .text_column(goal_column)?
                .into_iter()
                .map(|v| match v {
                    Some(s) if !s.is_empty() => s.to_string(),
                    _ => sentinel.to_string(),
                })
                .collect();
            table.set_text_column(goal_column, values)?;
            debug!(
                "Replaced {} blank goals with '{}'",
                blank_count, sentinel
            );
            Ok(BlankGoalOutcome {
                dropped: 0,
                replaced: blank_count,
            })
        }
    }
}

/// Rewrite every digit-only goal in sorted order.
///
/// Returns the number of cells that changed.
pub fn canonicalize_goals(table: &mut Table, goal_column: &str) -> Result<usize> {
    let mut changed = 0;
    let values: Vec<String> = table
        .text_column(goal_column)?
        .into_iter()
        .map(|v| {
            let value = v.unwrap_or("");
            let canon = canonical_goal(value);
            if canon != value {
                changed += 1;
            }
            canon
        })
        .collect();

    if changed > 0 {
        table.set_text_column(goal_column, values)?;
    }

    debug!("Canonicalized {} goal values", changed);
    Ok(changed)
}
