//! Pipeline module for orchestrating the cleaning stages.

mod builder;
pub mod progress;

pub use builder::{TableCleaner, TableCleanerBuilder};
pub use progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
