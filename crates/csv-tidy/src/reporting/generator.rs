use super::GoalFrequency;
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::types::{CleaningResult, CleaningSummary};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Machine-readable record of a cleaning run.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,
    /// Column names of the cleaned table
    pub columns: Vec<String>,
    /// Rows dropped by the run
    pub rows_removed: usize,
    /// Columns dropped by the run
    pub columns_removed: usize,
    /// Counters and actions from the run
    pub summary: CleaningSummary,
    /// Goal values, most frequent first
    pub goal_counts: Vec<GoalFrequency>,
    /// Configuration the run used
    pub config: CleanerConfig,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds and persists [`CleaningReport`]s.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Assemble a report from a finished run.
    pub fn build_report(
        input_file: &Path,
        result: &CleaningResult,
        config: &CleanerConfig,
    ) -> CleaningReport {
        CleaningReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            output_file: result
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
            columns: result.table.column_names(),
            rows_removed: result.summary.rows_removed(),
            columns_removed: result.summary.columns_removed(),
            summary: result.summary.clone(),
            goal_counts: result.goal_counts.clone(),
            config: config.clone(),
        }
    }

    /// Write `report` as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &CleaningReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
