//! Progress reporting for the cleaning pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_tidy::TableCleaner;
//!
//! let cleaner = TableCleaner::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the CSV file
    Loading,
    /// Replacing missing cells with empty strings
    FillingMissing,
    /// Stripping non-word characters from headers
    NormalizingColumns,
    /// Removing the configured columns
    DiscardingColumns,
    /// Trimming whitespace from text cells
    TrimmingStrings,
    /// Dropping or marking blank goals
    NormalizingGoals,
    /// Sorting digit-string goals
    CanonicalizingGoals,
    /// Counting goal frequencies
    Reporting,
    /// Writing the cleaned CSV
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::FillingMissing => "Filling Missing Cells",
            Self::NormalizingColumns => "Normalizing Column Names",
            Self::DiscardingColumns => "Discarding Columns",
            Self::TrimmingStrings => "Trimming Strings",
            Self::NormalizingGoals => "Normalizing Blank Goals",
            Self::CanonicalizingGoals => "Canonicalizing Goals",
            Self::Reporting => "Counting Goals",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the share of the overall run attributed to this stage.
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.30,
            Self::FillingMissing => 0.10,
            Self::NormalizingColumns => 0.02,
            Self::DiscardingColumns => 0.03,
            Self::TrimmingStrings => 0.10,
            Self::NormalizingGoals => 0.05,
            Self::CanonicalizingGoals => 0.05,
            Self::Reporting => 0.05,
            Self::Writing => 0.30,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Working stages in execution order.
    pub const PIPELINE: [CleaningStage; 9] = [
        Self::Loading,
        Self::FillingMissing,
        Self::NormalizingColumns,
        Self::DiscardingColumns,
        Self::TrimmingStrings,
        Self::NormalizingGoals,
        Self::CanonicalizingGoals,
        Self::Reporting,
        Self::Writing,
    ];

    /// Returns the cumulative progress at the start of this stage.
    ///
    /// Sums the weights of the earlier stages in the same order a stage's
    /// own end is computed, so one stage never ends past the next one's start.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Complete => 1.0,
            Self::Failed => 0.0,
            _ => Self::PIPELINE
                .iter()
                .take_while(|stage| *stage != self)
                .fold(0.0, |acc, stage| acc + stage.weight()),
        }
    }
}

/// A progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: CleaningStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Receives progress updates during a cleaning run.
///
/// Implementations must be `Send + Sync` so a cleaner can be handed to a
/// worker thread by an embedding application.
pub trait ProgressReporter: Send + Sync {
    /// Called at the start and end of every stage.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
