//! Configuration types for the cleaning pipeline.
//!
//! The dataset-specific knowledge (which column holds the goals, which
//! columns are dropped) lives here as data rather than in the stages, so the
//! same pipeline can be pointed at other tables.

use crate::utils::DEFAULT_NULL_MARKERS;
use serde::{Deserialize, Serialize};

/// What to do with rows whose goal cell is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlankGoalPolicy {
    /// Remove the row from the table
    #[default]
    Drop,
    /// Keep the row and write the sentinel into the goal cell
    Replace,
}

/// How strictly configured column names must match the table.
///
/// Applies to discard-list columns that are absent and to headers that
/// collapse onto the same name during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnPolicy {
    /// Fail the run
    #[default]
    Strict,
    /// Skip absent columns, de-duplicate colliding names with numeric suffixes
    Lenient,
}

/// Configuration for a cleaning run.
///
/// Use [`CleanerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use csv_tidy::config::{BlankGoalPolicy, CleanerConfig};
///
/// let config = CleanerConfig::builder()
///     .goal_column("Goal")
///     .blank_goals(BlankGoalPolicy::Replace)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Name of the goal column (after header normalization).
    /// Default: "Goal"
    pub goal_column: String,

    /// Columns removed from the table (after header normalization).
    /// Default: Array, Goal1, Goal2, Goal3
    pub discard_columns: Vec<String>,

    /// Handling of rows with a blank goal.
    /// Default: Drop
    pub blank_goals: BlankGoalPolicy,

    /// Value written into blank goal cells under [`BlankGoalPolicy::Replace`].
    /// Default: "none"
    pub blank_goal_sentinel: String,

    /// Strict or lenient matching of configured columns.
    /// Default: Strict
    pub column_policy: ColumnPolicy,

    /// Cell texts loaded as missing values.
    pub null_markers: Vec<String>,

    /// Replacement for the input's `.csv` suffix when deriving the output path.
    /// Default: "Clean.csv"
    pub output_suffix: String,

    /// Whether to write the cleaned table to disk.
    /// When false, results are kept in memory only.
    /// Default: true
    pub write_output: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            goal_column: "Goal".to_string(),
            discard_columns: default_discard_columns(),
            blank_goals: BlankGoalPolicy::default(),
            blank_goal_sentinel: "none".to_string(),
            column_policy: ColumnPolicy::default(),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
            output_suffix: "Clean.csv".to_string(),
            write_output: true,
        }
    }
}

fn default_discard_columns() -> Vec<String> {
    ["Array", "Goal1", "Goal2", "Goal3"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigValidationError> {
        let config: CleanerConfig = serde_json::from_str(json)
            .map_err(|e| ConfigValidationError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.goal_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyGoalColumn);
        }

        if self.discard_columns.contains(&self.goal_column) {
            return Err(ConfigValidationError::GoalColumnDiscarded(
                self.goal_column.clone(),
            ));
        }

        if self.blank_goals == BlankGoalPolicy::Replace && self.blank_goal_sentinel.is_empty() {
            return Err(ConfigValidationError::EmptySentinel);
        }

        if !self.output_suffix.ends_with(".csv") || self.output_suffix == ".csv" {
            return Err(ConfigValidationError::InvalidOutputSuffix(
                self.output_suffix.clone(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Goal column name must not be empty")]
    EmptyGoalColumn,

    #[error("Goal column '{0}' is also listed for discarding")]
    GoalColumnDiscarded(String),

    #[error("Blank goal sentinel must not be empty when blank goals are replaced")]
    EmptySentinel,

    #[error("Invalid output suffix '{0}' (must end with '.csv' and differ from it)")]
    InvalidOutputSuffix(String),

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    goal_column: Option<String>,
    discard_columns: Option<Vec<String>>,
    blank_goals: Option<BlankGoalPolicy>,
    blank_goal_sentinel: Option<String>,
    column_policy: Option<ColumnPolicy>,
    null_markers: Option<Vec<String>>,
    output_suffix: Option<String>,
    write_output: Option<bool>,
}

impl CleanerConfigBuilder {
    /// Set the name of the goal column.
    pub fn goal_column(mut self, name: impl Into<String>) -> Self {
        self.goal_column = Some(name.into());
        self
    }

    /// Replace the list of columns to discard.
    pub fn discard_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discard_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the policy for rows with blank goals.
    pub fn blank_goals(mut self, policy: BlankGoalPolicy) -> Self {
        self.blank_goals = Some(policy);
        self
    }

    /// Set the value written into blank goal cells.
    pub fn blank_goal_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.blank_goal_sentinel = Some(sentinel.into());
        self
    }

    /// Set strict or lenient column matching.
    pub fn column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = Some(policy);
        self
    }

    /// Replace the list of cell texts loaded as missing.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the suffix that replaces `.csv` in the output path.
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    /// Enable or disable writing the cleaned table to disk.
    pub fn write_output(mut self, write: bool) -> Self {
        self.write_output = Some(write);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let defaults = CleanerConfig::default();
        let config = CleanerConfig {
            goal_column: self.goal_column.unwrap_or(defaults.goal_column),
            discard_columns: self.discard_columns.unwrap_or(defaults.discard_columns),
            blank_goals: self.blank_goals.unwrap_or(defaults.blank_goals),
            blank_goal_sentinel: self
                .blank_goal_sentinel
                .unwrap_or(defaults.blank_goal_sentinel),
            column_policy: self.column_policy.unwrap_or(defaults.column_policy),
            null_markers: self.null_markers.unwrap_or(defaults.null_markers),
            output_suffix: self.output_suffix.unwrap_or(defaults.output_suffix),
            write_output: self.write_output.unwrap_or(defaults.write_output),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanerConfig::default();
        assert_eq!(config.goal_column, "Goal");
        assert_eq!(
            config.discard_columns,
            vec!["Array", "Goal1", "Goal2", "Goal3"]
        );
        assert_eq!(config.blank_goals, BlankGoalPolicy::Drop);
        assert_eq!(config.blank_goal_sentinel, "none");
        assert_eq!(config.column_policy, ColumnPolicy::Strict);
        assert_eq!(config.output_suffix, "Clean.csv");
        assert!(config.write_output);
        assert!(config.null_markers.iter().any(|m| m == "NaN"));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleanerConfig::builder()
            .goal_column("Target")
            .discard_columns(["Notes"])
            .blank_goals(BlankGoalPolicy::Replace)
            .blank_goal_sentinel("unset")
            .column_policy(ColumnPolicy::Lenient)
            .write_output(false)
            .build()
            .unwrap();

        assert_eq!(config.goal_column, "Target");
        assert_eq!(config.discard_columns, vec!["Notes"]);
        assert_eq!(config.blank_goals, BlankGoalPolicy::Replace);
        assert_eq!(config.blank_goal_sentinel, "unset");
        assert_eq!(config.column_policy, ColumnPolicy::Lenient);
        assert!(!config.write_output);
    }

    #[test]
    fn test_validation_empty_goal_column() {
        let result = CleanerConfig::builder().goal_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyGoalColumn
        ));
    }

    #[test]
    fn test_validation_goal_column_discarded() {
        let result = CleanerConfig::builder()
            .discard_columns(["Array", "Goal"])
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::GoalColumnDiscarded(_)
        ));
    }

    #[test]
    fn test_validation_empty_sentinel_only_matters_for_replace() {
        assert!(
            CleanerConfig::builder()
                .blank_goal_sentinel("")
                .build()
                .is_ok()
        );
        let result = CleanerConfig::builder()
            .blank_goals(BlankGoalPolicy::Replace)
            .blank_goal_sentinel("")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptySentinel
        ));
    }

    #[test]
    fn test_validation_output_suffix() {
        assert!(CleanerConfig::builder().output_suffix(".csv").build().is_err());
        assert!(CleanerConfig::builder().output_suffix("Clean").build().is_err());
        assert!(
            CleanerConfig::builder()
                .output_suffix("_tidy.csv")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_config_from_json_partial() {
        let json = r#"{
            "goal_column": "Goal",
            "blank_goals": "Replace",
            "column_policy": "Lenient"
        }"#;

        let config = CleanerConfig::from_json(json).expect("Should deserialize partial JSON");

        assert_eq!(config.blank_goals, BlankGoalPolicy::Replace);
        assert_eq!(config.column_policy, ColumnPolicy::Lenient);
        assert_eq!(config.blank_goal_sentinel, "none");
        assert_eq!(config.discard_columns.len(), 4);
    }

    #[test]
    fn test_config_from_json_malformed() {
        let result = CleanerConfig::from_json("{ not json");
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::Malformed(_)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = CleanerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: CleanerConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.goal_column, deserialized.goal_column);
        assert_eq!(config.blank_goals, deserialized.blank_goals);
        assert_eq!(config.discard_columns, deserialized.discard_columns);
    }
}
