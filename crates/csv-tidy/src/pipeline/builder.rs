//! Main cleaning pipeline module.
//!
//! This module provides the [`TableCleaner`] struct and builder for
//! running the cleaning stages over a CSV file.

use crate::cleaner::{
    canonicalize_goals, discard_columns, fill_missing, normalize_blank_goals,
    normalize_column_names, trim_text_columns,
};
use crate::config::{CleanerConfig, ConfigValidationError};
use crate::error::{Result, ResultExt};
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::reporting::goal_frequencies;
use crate::table::{Table, output_path_for, read_table, write_table};
use crate::types::{ActionType, CleaningAction, CleaningResult, CleaningSummary};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Loads, cleans and writes a goal-coded CSV table.
///
/// Use [`TableCleaner::builder()`] to attach a progress reporter, or
/// [`TableCleaner::new`] for a plain cleaner.
///
/// # Example
///
/// ```rust,ignore
/// use csv_tidy::{BlankGoalPolicy, CleanerConfig, TableCleaner};
/// use std::path::Path;
///
/// let config = CleanerConfig::builder()
///     .blank_goals(BlankGoalPolicy::Replace)
///     .build()?;
///
/// let result = TableCleaner::new(config)?.run(Path::new("elements.csv"))?;
/// println!("{} rows kept", result.table.height());
/// ```
pub struct TableCleaner {
    config: CleanerConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(TableCleaner: Send);

impl TableCleaner {
    /// Create a cleaner with the given configuration.
    pub fn new(config: CleanerConfig) -> std::result::Result<Self, ConfigValidationError> {
        Self::builder().config(config).build()
    }

    /// Create a new cleaner builder.
    pub fn builder() -> TableCleanerBuilder {
        TableCleanerBuilder::default()
    }

    /// The configuration this cleaner runs with.
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Where the cleaned version of `input` is written.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        output_path_for(input, &self.config.output_suffix)
    }

    /// Run the whole pipeline on the CSV at `input`.
    ///
    /// Loads the file, applies every cleaning stage, counts goal values and,
    /// unless `write_output` is disabled, writes the cleaned table next to
    /// the input. Nothing is written if any stage fails.
    pub fn run(&self, input: &Path) -> Result<CleaningResult> {
        match self.run_internal(input) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Cleaning completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Cleaning failed: {}", e);
                Err(e)
            }
        }
    }

    fn run_internal(&self, input: &Path) -> Result<CleaningResult> {
        let start_time = Instant::now();

        info!("Starting cleaning pipeline...");
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            0.0,
            format!("Loading {}", input.display()),
        ));
        let mut table = read_table(input, &self.config)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            1.0,
            format!("Loaded {} rows x {} columns", table.height(), table.width()),
        ));

        let mut summary = self.clean(&mut table)?;

        self.report_progress(ProgressUpdate::new(
            CleaningStage::Reporting,
            0.0,
            "Counting goal values...",
        ));
        let goal_counts = goal_frequencies(&table, &self.config.goal_column)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Reporting,
            1.0,
            format!("{} distinct goal values", goal_counts.len()),
        ));

        let output_path = if self.config.write_output {
            let path = self.output_path(input);
            self.report_progress(ProgressUpdate::new(
                CleaningStage::Writing,
                0.0,
                format!("Writing {}", path.display()),
            ));
            write_table(&mut table, &path).context("Writing cleaned table")?;
            self.report_progress(ProgressUpdate::new(
                CleaningStage::Writing,
                1.0,
                "Output written",
            ));
            Some(path)
        } else {
            debug!("Skipping output write (disabled)");
            None
        };

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Cleaning finished in {}ms", summary.duration_ms);

        Ok(CleaningResult {
            table,
            goal_counts,
            summary,
            output_path,
        })
    }

    /// Apply the in-memory cleaning stages to a loaded table.
    ///
    /// Stages run in order: fill missing cells, normalize column names,
    /// discard columns, trim text, normalize blank goals, canonicalize goals.
    pub fn clean(&self, table: &mut Table) -> Result<CleaningSummary> {
        let start_time = Instant::now();
        let config = &self.config;
        let goal = config.goal_column.as_str();

        let mut summary = CleaningSummary::new();
        summary.rows_before = table.height();
        summary.columns_before = table.width();

        // Step 1: missing cells
        self.stage_started(CleaningStage::FillingMissing);
        summary.cells_filled = fill_missing(table).context("Filling missing cells")?;
        if summary.cells_filled > 0 {
            summary.add_action(CleaningAction::new(
                ActionType::MissingFilled,
                "table",
                format!("Filled {} missing cells with empty strings", summary.cells_filled),
            ));
        }
        self.stage_finished(CleaningStage::FillingMissing);

        // Step 2: headers
        self.stage_started(CleaningStage::NormalizingColumns);
        let renamed_columns = normalize_column_names(table, config.column_policy)
            .context("Normalizing column names")?;
        for (original, renamed) in &renamed_columns {
            summary.add_action(CleaningAction::new(
                ActionType::ColumnRenamed,
                renamed,
                format!("Renamed column '{}' to '{}'", original, renamed),
            ));
        }
        summary.columns_renamed = renamed_columns;
        self.stage_finished(CleaningStage::NormalizingColumns);

        // Step 3: discard list
        self.stage_started(CleaningStage::DiscardingColumns);
        let (discarded, skipped) =
            discard_columns(table, &config.discard_columns, config.column_policy)
                .context("Discarding columns")?;
        for name in &discarded {
            summary.add_action(CleaningAction::new(
                ActionType::ColumnRemoved,
                name,
                format!("Discarded column '{}'", name),
            ));
        }
        summary.columns_discarded = discarded;
        summary.columns_skipped = skipped;
        self.stage_finished(CleaningStage::DiscardingColumns);

        // Step 4: whitespace
        self.stage_started(CleaningStage::TrimmingStrings);
        summary.cells_trimmed = trim_text_columns(table).context("Trimming text")?;
        if summary.cells_trimmed > 0 {
            summary.add_action(CleaningAction::new(
                ActionType::WhitespaceTrimmed,
                "table",
                format!("Trimmed whitespace from {} cells", summary.cells_trimmed),
            ));
        }
        self.stage_finished(CleaningStage::TrimmingStrings);

        // Step 5: blank goals
        self.stage_started(CleaningStage::NormalizingGoals);
        let outcome = normalize_blank_goals(
            table,
            goal,
            config.blank_goals,
            &config.blank_goal_sentinel,
        )
        .context("Normalizing blank goals")?;
        summary.blank_goals_dropped = outcome.dropped;
        summary.blank_goals_replaced = outcome.replaced;
        if outcome.dropped > 0 {
            summary.add_action(CleaningAction::new(
                ActionType::RowsRemoved,
                goal,
                format!("Dropped {} rows with a blank goal", outcome.dropped),
            ));
        }
        if outcome.replaced > 0 {
            summary.add_action(CleaningAction::new(
                ActionType::GoalsReplaced,
                goal,
                format!(
                    "Replaced {} blank goals with '{}'",
                    outcome.replaced, config.blank_goal_sentinel
                ),
            ));
        }
        self.stage_finished(CleaningStage::NormalizingGoals);

        // Step 6: canonical goal order
        self.stage_started(CleaningStage::CanonicalizingGoals);
        summary.goals_canonicalized =
            canonicalize_goals(table, goal).context("Canonicalizing goals")?;
        if summary.goals_canonicalized > 0 {
            summary.add_action(CleaningAction::new(
                ActionType::GoalsCanonicalized,
                goal,
                format!(
                    "Sorted digits of {} goal values",
                    summary.goals_canonicalized
                ),
            ));
        }
        self.stage_finished(CleaningStage::CanonicalizingGoals);

        summary.rows_after = table.height();
        summary.columns_after = table.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        for action in &summary.actions {
            debug!("{}: {}", action.action_type.display_name(), action.description);
        }
        info!(
            "Cleaned table: removed {} rows and {} columns ({} x {} remain)",
            summary.rows_removed(),
            summary.columns_removed(),
            summary.rows_after,
            summary.columns_after
        );

        Ok(summary)
    }

    fn stage_started(&self, stage: CleaningStage) {
        info!("{}...", stage.display_name());
        self.report_progress(ProgressUpdate::new(
            stage,
            0.0,
            format!("{}...", stage.display_name()),
        ));
    }

    fn stage_finished(&self, stage: CleaningStage) {
        self.report_progress(ProgressUpdate::new(
            stage,
            1.0,
            format!("{} complete", stage.display_name()),
        ));
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for creating a [`TableCleaner`] instance.
///
/// # Example
///
/// ```rust,ignore
/// let cleaner = TableCleaner::builder()
///     .config(CleanerConfig::default())
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?;
/// ```
#[derive(Default)]
pub struct TableCleanerBuilder {
    config: Option<CleanerConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(TableCleanerBuilder: Send);

impl TableCleanerBuilder {
    /// Set the cleaning configuration.
    pub fn config(mut self, config: CleanerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during a run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the cleaner.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<TableCleaner, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(TableCleaner {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
