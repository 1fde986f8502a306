//! Column-level operations: header normalization and discarding.

use crate::config::ColumnPolicy;
use crate::error::{CleaningError, Result};
use crate::table::Table;
use crate::utils::normalize_column_name;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Strip non-word characters from every column name.
///
/// Under [`ColumnPolicy::Strict`] a name that collides with an earlier one
/// fails with [`CleaningError::DuplicateColumn`]; under
/// [`ColumnPolicy::Lenient`] it gets the first free `_1`, `_2`, ... suffix.
///
/// Returns the `(original, normalized)` pairs of columns whose name changed.
pub fn normalize_column_names(
    table: &mut Table,
    policy: ColumnPolicy,
) -> Result<Vec<(String, String)>> {
    let originals = table.column_names();
    let mut seen: HashSet<String> = HashSet::with_capacity(originals.len());
    let mut normalized = Vec::with_capacity(originals.len());
    let mut renamed = Vec::new();

    for original in &originals {
        let base = normalize_column_name(original);
        let mut name = base.clone();

        if seen.contains(&name) {
            match policy {
                ColumnPolicy::Strict => {
                    return Err(CleaningError::DuplicateColumn {
                        name,
                        original: original.clone(),
                    });
                }
                ColumnPolicy::Lenient => {
                    let mut count = 0;
                    while seen.contains(&name) {
                        count += 1;
                        name = format!("{}_{}", base, count);
                    }
                    warn!(
                        "Column '{}' collides with '{}', renamed to '{}'",
                        original, base, name
                    );
                }
            }
        }

        if &name != original {
            debug!("Renaming column '{}' -> '{}'", original, name);
            renamed.push((original.clone(), name.clone()));
        }
        seen.insert(name.clone());
        normalized.push(name);
    }

    if !renamed.is_empty() {
        table.set_column_names(&normalized)?;
    }

    Ok(renamed)
}

/// Remove the named columns.
///
/// Under [`ColumnPolicy::Strict`] every column must exist; the check runs
/// before anything is dropped so a failure leaves the table untouched.
/// Under [`ColumnPolicy::Lenient`] absent columns are skipped.
///
/// Returns `(discarded, skipped)`.
pub fn discard_columns(
    table: &mut Table,
    columns: &[String],
    policy: ColumnPolicy,
) -> Result<(Vec<String>, Vec<String>)> {
    let (present, absent): (Vec<String>, Vec<String>) = columns
        .iter()
        .cloned()
        .partition(|name| table.has_column(name));

    if let Some(missing) = absent.first()
        && policy == ColumnPolicy::Strict
    {
        return Err(CleaningError::ColumnNotFound(missing.clone()));
    }

    for name in &absent {
        warn!("Column '{}' not present, skipping discard", name);
    }

    let mut discarded = Vec::with_capacity(present.len());
    for name in present {
        // listed twice in the config
        if !table.has_column(&name) {
            continue;
        }
        table.drop_column(&name)?;
        debug!("Discarded column '{}'", name);
        discarded.push(name);
    }

    Ok((discarded, absent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn table_with(names: &[&str]) -> Table {
        let columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new((*n).into(), ["x"]))
            .collect();
        Table::new(DataFrame::new(columns).unwrap())
    }

    #[test]
    fn test_normalize_column_names() {
        let mut table = table_with(&["Goal", " Goal 1", "Array (raw)", "id_2"]);

        let renamed = normalize_column_names(&mut table, ColumnPolicy::Strict).unwrap();

        assert_eq!(table.column_names(), vec!["Goal", "Goal1", "Arrayraw", "id_2"]);
        assert_eq!(
            renamed,
            vec![
                (" Goal 1".to_string(), "Goal1".to_string()),
                ("Array (raw)".to_string(), "Arrayraw".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalize_twice_is_noop() {
        let mut table = table_with(&["A b", "c-d"]);
        normalize_column_names(&mut table, ColumnPolicy::Strict).unwrap();
        let renamed = normalize_column_names(&mut table, ColumnPolicy::Strict).unwrap();
        assert!(renamed.is_empty());
        assert_eq!(table.column_names(), vec!["Ab", "cd"]);
    }

    #[test]
    fn test_normalize_collision_strict() {
        let mut table = table_with(&["Goal", "Go-al"]);
        let err = normalize_column_names(&mut table, ColumnPolicy::Strict).unwrap_err();
        assert!(matches!(err, CleaningError::DuplicateColumn { .. }));
        assert_eq!(table.column_names(), vec!["Goal", "Go-al"]);
    }

    #[test]
    fn test_normalize_collision_lenient() {
        let mut table = table_with(&["Goal", "Go-al", "G oal", "Goal_1x"]);
        normalize_column_names(&mut table, ColumnPolicy::Lenient).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Goal", "Goal_1", "Goal_2", "Goal_1x"]
        );
    }

    #[test]
    fn test_discard_columns_all_present() {
        let mut table = table_with(&["Name", "Array", "Goal", "Goal1", "Goal2", "Goal3"]);
        let discard: Vec<String> = ["Array", "Goal1", "Goal2", "Goal3"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (discarded, skipped) =
            discard_columns(&mut table, &discard, ColumnPolicy::Strict).unwrap();

        assert_eq!(discarded, discard);
        assert!(skipped.is_empty());
        assert_eq!(table.column_names(), vec!["Name", "Goal"]);
    }

    #[test]
    fn test_discard_columns_strict_missing() {
        let mut table = table_with(&["Name", "Array", "Goal"]);
        let discard = vec!["Array".to_string(), "Goal1".to_string()];

        let err = discard_columns(&mut table, &discard, ColumnPolicy::Strict).unwrap_err();

        assert!(err.is_missing_column());
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn test_discard_columns_lenient_missing() {
        let mut table = table_with(&["Name", "Array", "Goal"]);
        let discard = vec!["Array".to_string(), "Goal1".to_string()];

        let (discarded, skipped) =
            discard_columns(&mut table, &discard, ColumnPolicy::Lenient).unwrap();

        assert_eq!(discarded, vec!["Array"]);
        assert_eq!(skipped, vec!["Goal1"]);
        assert_eq!(table.column_names(), vec!["Name", "Goal"]);
    }
}
