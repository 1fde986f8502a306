//! Value-level sanitization: missing cells and surrounding whitespace.

use crate::error::Result;
use crate::table::{ColumnKind, Table};
use polars::prelude::*;
use tracing::debug;

/// Replace every missing cell with an empty string.
///
/// Columns that hold missing cells become text columns; their present
/// values are rendered as text. Returns the number of cells filled.
pub fn fill_missing(table: &mut Table) -> Result<usize> {
    let mut total_filled = 0;

    for col_name in table.column_names() {
        let filled: Vec<String> = {
            let series = table.column(&col_name)?;
            let null_count = series.null_count();
            if null_count == 0 {
                continue;
            }
            total_filled += null_count;

            let text = if series.dtype() == &DataType::String {
                series.clone()
            } else {
                debug!(
                    "Column '{}' ({}) holds missing cells, converting to text",
                    col_name,
                    ColumnKind::from_dtype(series.dtype()).as_str()
                );
                series.cast(&DataType::String)?
            };

            let values: Vec<String> = text
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or("").to_string())
                .collect();
            values
        };

        table.set_text_column(&col_name, filled)?;
    }

    if total_filled > 0 {
        debug!("Filled {} missing cells with empty strings", total_filled);
    }

    Ok(total_filled)
}

/// Strip leading and trailing whitespace from every text cell.
///
/// Non-text columns are left alone. Returns the number of cells changed.
pub fn trim_text_columns(table: &mut Table) -> Result<usize> {
    let mut total_trimmed = 0;

    let text_columns: Vec<String> = table
        .schema()
        .into_iter()
        .filter(|(_, kind)| *kind == ColumnKind::Text)
        .map(|(name, _)| name)
        .collect();

    for col_name in &text_columns {
        let mut changed = 0;
        let trimmed: Vec<Option<String>> = table
            .text_column(col_name)?
            .into_iter()
            .map(|opt_val| {
                opt_val.map(|val| {
                    let t = val.trim();
                    if t.len() != val.len() {
                        changed += 1;
                    }
                    t.to_string()
                })
            })
            .collect();

        if changed > 0 {
            let series = Series::new(col_name.as_str().into(), trimmed);
            table.frame_mut().replace(col_name, series)?;
            total_trimmed += changed;
        }
    }

    debug!("Trimmed whitespace from {} cells", total_trimmed);
    Ok(total_trimmed)
}
