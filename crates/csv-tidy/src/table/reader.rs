//! CSV loading.

use super::Table;
use crate::config::CleanerConfig;
use crate::error::{CleaningError, Result};
use crate::utils::normalize_column_name;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Load a CSV file into a [`Table`].
///
/// The goal column is always read as text so digit strings keep leading
/// zeros and are never coerced to numbers. It is located by comparing each
/// raw header's normalized form with `config.goal_column`. All other column
/// types are inferred over the whole file.
pub fn read_table(path: &Path, config: &CleanerConfig) -> Result<Table> {
    if !path.is_file() {
        return Err(CleaningError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading table from: {}", path.display());

    let headers = read_headers(path, config)?;
    let mut overrides = Schema::default();
    for raw in headers
        .iter()
        .filter(|raw| normalize_column_name(raw) == config.goal_column)
    {
        debug!("Reading '{}' as text", raw);
        overrides.with_column(raw.as_str().into(), DataType::String);
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_schema_overwrite(Some(Arc::new(overrides)))
        .with_parse_options(parse_options(config))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| parse_error(path, e))?;

    info!("Table loaded: {} rows x {} columns", df.height(), df.width());
    Ok(Table::new(df))
}

/// Read the header row without inferring any column types.
fn read_headers(path: &Path, config: &CleanerConfig) -> Result<Vec<String>> {
    let probe = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_n_rows(Some(1))
        .with_parse_options(parse_options(config))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| parse_error(path, e))?;

    Ok(probe
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect())
}

fn parse_options(config: &CleanerConfig) -> CsvParseOptions {
    let markers: Vec<PlSmallStr> = config
        .null_markers
        .iter()
        .map(|m| PlSmallStr::from(m.as_str()))
        .collect();

    CsvParseOptions::default()
        .with_quote_char(Some(b'"'))
        .with_null_values(Some(NullValues::AllColumns(markers)))
}

fn parse_error(path: &Path, error: PolarsError) -> CleaningError {
    CleaningError::Parse {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
