//! CSV writing and output path derivation.

use super::Table;
use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Derive the output path from the input path.
///
/// A trailing `.csv` in the file name is replaced by `suffix`
/// (`elements.csv` -> `elementsClean.csv`); any other name gets `suffix`
/// appended. Directory components are left untouched.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".csv").unwrap_or(&name);
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Write a table as CSV with a header row and no index column.
pub fn write_table(table: &mut Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(table.frame_mut())?;

    info!("Table saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanerConfig;
    use crate::table::read_table;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("elements.csv"), "Clean.csv"),
            PathBuf::from("elementsClean.csv")
        );
        assert_eq!(
            output_path_for(Path::new("data/elements.csv"), "Clean.csv"),
            PathBuf::from("data/elementsClean.csv")
        );
        assert_eq!(
            output_path_for(Path::new("export"), "Clean.csv"),
            PathBuf::from("exportClean.csv")
        );
    }

    #[test]
    fn test_output_path_only_touches_file_name() {
        assert_eq!(
            output_path_for(Path::new("raw.csv.d/goals.csv"), "_tidy.csv"),
            PathBuf::from("raw.csv.d/goals_tidy.csv")
        );
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("tableClean.csv");
        let df = df![
            "Name" => ["alpha", "beta, with comma", ""],
            "Goal" => ["012", "none", "3"],
            "Size" => [1i64, 2, 3],
        ]
        .unwrap();
        let mut table = Table::new(df);

        write_table(&mut table, &path).unwrap();
        let config = CleanerConfig::builder()
            .null_markers(Vec::<String>::new())
            .build()
            .unwrap();
        let back = read_table(&path, &config).unwrap();

        assert_eq!(back.column_names(), table.column_names());
        assert_eq!(back.height(), 3);
        for name in ["Name", "Goal", "Size"] {
            for row in 0..3 {
                let expected = table.cell_text(name, row).unwrap();
                let actual = back.cell_text(name, row).unwrap();
                // an empty text cell may come back as missing
                assert_eq!(actual.unwrap_or_default(), expected.unwrap_or_default());
            }
        }
    }
}
