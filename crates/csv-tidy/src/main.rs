//! CLI entry point for the cleaning pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use csv_tidy::{
    BlankGoalPolicy, CleanerConfig, CleaningResult, ColumnPolicy, ReportGenerator, TableCleaner,
    render_goal_counts,
};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a goal-coded CSV table for visualization",
    long_about = "Loads a CSV table, normalizes its headers, drops unused columns, trims \
                  text, normalizes the goal column and writes <name>Clean.csv next to it.\n\n\
                  EXAMPLES:\n  \
                  # Clean ./elements.csv into ./elementsClean.csv\n  \
                  csv-tidy\n\n  \
                  # Keep rows without goals, marking them \"none\"\n  \
                  csv-tidy -i data/elements.csv --keep-blank-goals\n\n  \
                  # Another dataset\n  \
                  csv-tidy -i survey.csv --goal-column Target --discard Notes --discard Raw"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long, default_value = "elements.csv")]
    input: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep rows with a blank goal and write "none" into them
    #[arg(long)]
    keep_blank_goals: bool,

    /// Name of the goal column (after header normalization)
    #[arg(long)]
    goal_column: Option<String>,

    /// Column to discard; repeat to list several (replaces the default list)
    #[arg(long = "discard", value_name = "COLUMN")]
    discard: Vec<String>,

    /// Skip absent discard columns and de-duplicate colliding headers
    #[arg(long)]
    lenient: bool,

    /// Run every stage but do not write the cleaned CSV
    #[arg(long)]
    no_write: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output a JSON report to stdout instead of the goal table
    ///
    /// Disables all logs; only the report is printed.
    #[arg(long)]
    json: bool,

    /// Write a JSON report as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Directory for --emit-report
    #[arg(long, default_value = ".")]
    report_dir: PathBuf,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the goal table. When
/// `json_output` is true, logging is disabled entirely.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // .env may carry RUST_LOG, so load it before the subscriber reads it
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    debug!("Effective configuration: {:?}", config);

    let mut builder = TableCleaner::builder().config(config.clone());
    if !args.quiet {
        builder = builder.on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let cleaner = builder.build()?;

    let result = cleaner
        .run(&args.input)
        .with_context(|| format!("Failed to clean {}", args.input.display()))?;

    handle_output(&result, &config, &args)
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<CleanerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            CleanerConfig::from_json(&json)?
        }
        None => CleanerConfig::default(),
    };

    if args.keep_blank_goals {
        config.blank_goals = BlankGoalPolicy::Replace;
    }
    if let Some(ref goal) = args.goal_column {
        config.goal_column = goal.clone();
    }
    if !args.discard.is_empty() {
        config.discard_columns = args.discard.clone();
    }
    if args.lenient {
        config.column_policy = ColumnPolicy::Lenient;
    }
    if args.no_write {
        config.write_output = false;
    }

    config.validate()?;
    Ok(config)
}

/// Print results based on CLI flags.
///
/// - Default: goal counts table and the output path on stdout
/// - `--json`: JSON report on stdout only
/// - `--emit-report`: additionally write the JSON report to a file
fn handle_output(result: &CleaningResult, config: &CleanerConfig, args: &Args) -> Result<()> {
    let report = ReportGenerator::build_report(&args.input, result, config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(&args.report_dir);
        let report_path =
            generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print!("{}", render_goal_counts(&config.goal_column, &result.goal_counts));

    if let Some(ref path) = result.output_path {
        println!("clean output written to '{}'", path.display());
    }

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
