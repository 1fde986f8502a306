//! Goal value frequencies.

use crate::error::Result;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A distinct goal value and the number of rows holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalFrequency {
    pub value: String,
    pub count: usize,
}

/// Count rows per distinct goal value.
///
/// Ordered by descending count; equal counts keep the order in which the
/// values first appear in the table.
pub fn goal_frequencies(table: &Table, goal_column: &str) -> Result<Vec<GoalFrequency>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut frequencies: Vec<GoalFrequency> = Vec::new();

    for value in table.text_column(goal_column)?.into_iter() {
        let value = value.unwrap_or("");
        match index.get(value) {
            Some(&i) => frequencies[i].count += 1,
            None => {
                index.insert(value.to_string(), frequencies.len());
                frequencies.push(GoalFrequency {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order among ties
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(frequencies)
}

/// Render frequencies as a two-column console table under a heading.
///
/// ```text
/// Goal counts
/// 123   4
/// none  2
/// ```
pub fn render_goal_counts(goal_column: &str, frequencies: &[GoalFrequency]) -> String {
    let value_width = frequencies
        .iter()
        .map(|f| f.value.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = frequencies
        .iter()
        .map(|f| f.count.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} counts\n", goal_column);
    for f in frequencies {
        out.push_str(&format!(
            "{:<vw$}  {:>cw$}\n",
            f.value,
            f.count,
            vw = value_width,
            cw = count_width
        ));
    }
    out
}
