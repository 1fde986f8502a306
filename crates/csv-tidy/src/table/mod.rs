//! In-memory table with explicit per-column type tags.
//!
//! [`Table`] wraps a polars `DataFrame`. Each column's [`ColumnKind`] is
//! fixed by the dtype chosen when the CSV was loaded, and stages reach
//! cell data through typed accessors instead of inspecting dtypes ad hoc.

mod reader;
mod writer;

pub use reader::read_table;
pub use writer::{output_path_for, write_table};

use crate::error::{CleaningError, Result};
use polars::prelude::*;

/// Category of a column for cleaning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// String/text values
    Text,
    /// Integer or floating point numbers
    Numeric,
    /// Boolean values
    Boolean,
    /// Date, datetime, time or duration values
    Temporal,
    /// Anything else (nested, null-typed, ...)
    Other,
}

impl ColumnKind {
    /// Map a polars dtype onto a column kind.
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::String => Self::Text,
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => Self::Numeric,
            DataType::Boolean => Self::Boolean,
            DataType::Date | DataType::Datetime(_, _) | DataType::Time | DataType::Duration(_) => {
                Self::Temporal
            }
            _ => Self::Other,
        }
    }

    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Other => "other",
        }
    }
}

/// An ordered set of named, row-aligned columns.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
}

impl Table {
    /// Wrap an existing DataFrame.
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub(crate) fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.df
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    /// Column names paired with their kinds, in table order.
    pub fn schema(&self) -> Vec<(String, ColumnKind)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), ColumnKind::from_dtype(col.dtype())))
            .collect()
    }

    /// Kind of a single column.
    pub fn kind_of(&self, name: &str) -> Result<ColumnKind> {
        Ok(ColumnKind::from_dtype(self.column(name)?.dtype()))
    }

    /// Borrow a column as a series.
    pub fn column(&self, name: &str) -> Result<&Series> {
        if !self.has_column(name) {
            return Err(CleaningError::ColumnNotFound(name.to_string()));
        }
        Ok(self.df.column(name)?.as_materialized_series())
    }

    /// Borrow a text column's values.
    ///
    /// Fails with [`CleaningError::ColumnType`] for non-text columns.
    pub fn text_column(&self, name: &str) -> Result<&StringChunked> {
        let series = self.column(name)?;
        let kind = ColumnKind::from_dtype(series.dtype());
        if kind != ColumnKind::Text {
            return Err(CleaningError::ColumnType {
                column: name.to_string(),
                expected: ColumnKind::Text.as_str(),
                actual: kind.as_str(),
            });
        }
        Ok(series.str()?)
    }

    /// Replace a column with new text values of the same length.
    pub fn set_text_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if !self.has_column(name) {
            return Err(CleaningError::ColumnNotFound(name.to_string()));
        }
        let series = Series::new(name.into(), values);
        self.df.replace(name, series)?;
        Ok(())
    }

    /// Keep only the rows where `keep` is true.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<()> {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.df = self.df.filter(&mask)?;
        Ok(())
    }

    /// Remove a column.
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        if !self.has_column(name) {
            return Err(CleaningError::ColumnNotFound(name.to_string()));
        }
        self.df.drop_in_place(name)?;
        Ok(())
    }

    /// Rename every column at once; `names` must match the table width.
    pub fn set_column_names(&mut self, names: &[String]) -> Result<()> {
        self.df
            .set_column_names(names.iter().map(|s| PlSmallStr::from(s.as_str())))?;
        Ok(())
    }

    /// Render a cell as text; missing cells become `None`.
    pub fn cell_text(&self, name: &str, row: usize) -> Result<Option<String>> {
        let value = self.column(name)?.get(row)?;
        Ok(match value {
            AnyValue::Null => None,
            AnyValue::String(s) => Some(s.to_string()),
            AnyValue::StringOwned(s) => Some(s.to_string()),
            other => Some(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let df = df![
            "Goal" => ["12", "", "3"],
            "Score" => [1i64, 2, 3],
            "Flag" => [true, false, true],
        ]
        .unwrap();
        Table::new(df)
    }

    #[test]
    fn test_column_kind_from_dtype() {
        assert_eq!(ColumnKind::from_dtype(&DataType::String), ColumnKind::Text);
        assert_eq!(ColumnKind::from_dtype(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_dtype(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_dtype(&DataType::Boolean), ColumnKind::Boolean);
        assert_eq!(ColumnKind::from_dtype(&DataType::Date), ColumnKind::Temporal);
        assert_eq!(ColumnKind::from_dtype(&DataType::Null), ColumnKind::Other);
    }

    #[test]
    fn test_schema_and_kind_of() {
        let table = sample();
        assert_eq!(
            table.schema(),
            vec![
                ("Goal".to_string(), ColumnKind::Text),
                ("Score".to_string(), ColumnKind::Numeric),
                ("Flag".to_string(), ColumnKind::Boolean),
            ]
        );
        assert_eq!(table.kind_of("Score").unwrap(), ColumnKind::Numeric);
        assert!(table.kind_of("Nope").unwrap_err().is_missing_column());
    }

    #[test]
    fn test_text_column_rejects_numeric() {
        let table = sample();
        assert!(table.text_column("Goal").is_ok());
        let err = table.text_column("Score").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_TYPE");
    }

    #[test]
    fn test_set_text_column_and_retain_rows() {
        let mut table = sample();
        table
            .set_text_column("Goal", vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        table.retain_rows(&[true, false, true]).unwrap();

        assert_eq!(table.height(), 2);
        assert_eq!(table.cell_text("Goal", 1).unwrap(), Some("c".to_string()));
        assert_eq!(table.cell_text("Score", 1).unwrap(), Some("3".to_string()));
    }

    #[test]
    fn test_drop_and_rename() {
        let mut table = sample();
        table.drop_column("Flag").unwrap();
        table
            .set_column_names(&["G".to_string(), "S".to_string()])
            .unwrap();
        assert_eq!(table.column_names(), vec!["G", "S"]);
        assert!(table.drop_column("Flag").unwrap_err().is_missing_column());
    }
}
