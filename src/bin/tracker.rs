//! Tracker CLI - Command-line interface for stride-log
//!
//! Commands:
//! - demo: Process the built-in sample records
//! - days: Process day-step records from a file or stdin
//! - trainings: Process training records from a file or stdin

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stride_log::report::{DAY_ACTIVITY_HEADER, TRAINING_LOG_HEADER};
use stride_log::types::{DaySummary, RecordOutcome, TrainingSummary};
use stride_log::{
    logging, ConfigError, MetricsConfig, StandardCalculator, TrackerProcessor, UserProfile,
    TRACKER_VERSION,
};

/// Sample day-step records processed by `tracker demo`
const DEMO_DAY_RECORDS: [&str; 7] = [
    "678,0h50m",
    "792,1h14m",
    "1078,1h30m",
    "7830,2h40m",
    ",3456",
    "12:40:00, 3456",
    "something is wrong",
];

/// Sample training records processed by `tracker demo`
const DEMO_TRAINING_RECORDS: [&str; 7] = [
    "3456,Ходьба,3h00m",
    "something is wrong",
    "678,Бег,0h5m",
    "1078,Бег,0h10m",
    ",3456 Ходьба",
    "7892,Ходьба,3h10m",
    "15392,Бег,0h45m",
];

/// Tracker - step and training log formatter
#[derive(Parser)]
#[command(name = "tracker")]
#[command(version = TRACKER_VERSION)]
#[command(about = "Compute distance, speed and calories from activity logs", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOptions {
    /// User weight in kilograms
    #[arg(long, global = true, default_value = "84.6")]
    weight: f64,

    /// User height in meters
    #[arg(long, global = true, default_value = "1.87")]
    height: f64,

    /// JSON file overriding calculator constants
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the built-in sample records
    Demo,

    /// Process day-step records (`<steps>,<duration>` per line)
    Days {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Process training records (`<steps>,<label>,<duration>` per line)
    Trainings {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Header followed by one report block per record
    Text,
    /// Newline-delimited JSON (one record outcome per line)
    Ndjson,
    /// Pretty-printed JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.options.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TrackerCliError> {
    let processor = build_processor(&cli.options)?;
    let format = cli.options.format;

    match cli.command {
        Commands::Demo => cmd_demo(&processor, &format),
        Commands::Days { input } => {
            let lines = read_records(&input)?;
            print_days(&processor, &lines, &format)
        }
        Commands::Trainings { input } => {
            let lines = read_records(&input)?;
            print_trainings(&processor, &lines, &format)
        }
    }
}

fn build_processor(options: &GlobalOptions) -> Result<TrackerProcessor, TrackerCliError> {
    let profile = UserProfile::new(options.weight, options.height)?;

    let config = match &options.constants {
        Some(path) => MetricsConfig::from_json(&fs::read_to_string(path)?)?,
        None => MetricsConfig::default(),
    };

    let processor = TrackerProcessor::with_calculator(profile, StandardCalculator::new(config));
    tracing::debug!(
        profile = ?processor.profile(),
        config = ?processor.calculator().config(),
        "configured processor"
    );

    Ok(processor)
}

fn cmd_demo(processor: &TrackerProcessor, format: &OutputFormat) -> Result<(), TrackerCliError> {
    match format {
        OutputFormat::Text => {
            print_text(DAY_ACTIVITY_HEADER, &processor.day_reports(&DEMO_DAY_RECORDS));
            print_text(
                TRAINING_LOG_HEADER,
                &processor.training_reports(&DEMO_TRAINING_RECORDS),
            );
            Ok(())
        }
        OutputFormat::Ndjson => {
            print_ndjson(&processor.day_outcomes(&DEMO_DAY_RECORDS))?;
            print_ndjson(&processor.training_outcomes(&DEMO_TRAINING_RECORDS))
        }
        OutputFormat::Json => {
            let report = DemoReport {
                days: processor.day_outcomes(&DEMO_DAY_RECORDS),
                trainings: processor.training_outcomes(&DEMO_TRAINING_RECORDS),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn print_days(
    processor: &TrackerProcessor,
    lines: &[String],
    format: &OutputFormat,
) -> Result<(), TrackerCliError> {
    match format {
        OutputFormat::Text => {
            print_text(DAY_ACTIVITY_HEADER, &processor.day_reports(lines));
            Ok(())
        }
        OutputFormat::Ndjson => print_ndjson(&processor.day_outcomes(lines)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&processor.day_outcomes(lines))?
            );
            Ok(())
        }
    }
}

fn print_trainings(
    processor: &TrackerProcessor,
    lines: &[String],
    format: &OutputFormat,
) -> Result<(), TrackerCliError> {
    match format {
        OutputFormat::Text => {
            print_text(TRAINING_LOG_HEADER, &processor.training_reports(lines));
            Ok(())
        }
        OutputFormat::Ndjson => print_ndjson(&processor.training_outcomes(lines)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&processor.training_outcomes(lines))?
            );
            Ok(())
        }
    }
}

// Helper functions

fn print_text(header: &str, reports: &[String]) {
    println!("{header}");
    for report in reports {
        println!("{report}");
    }
}

fn print_ndjson<T: Serialize>(outcomes: &[RecordOutcome<T>]) -> Result<(), TrackerCliError> {
    for outcome in outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    tracing::debug!(
        records = outcomes.len(),
        rejected = outcomes.iter().filter(|o| !o.is_ok()).count(),
        "wrote record outcomes"
    );
    Ok(())
}

/// Read one record per line, skipping blank lines
fn read_records(input: &Path) -> Result<Vec<String>, TrackerCliError> {
    let data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            tracing::info!("reading records from the terminal, end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let lines = record_lines(&data);
    if lines.is_empty() {
        return Err(TrackerCliError::NoRecords);
    }

    Ok(lines)
}

/// Split input into records. Blank lines take no report slot.
fn record_lines(data: &str) -> Vec<String> {
    data.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

// Error types

#[derive(Debug)]
enum TrackerCliError {
    Io(io::Error),
    Config(ConfigError),
    Json(serde_json::Error),
    NoRecords,
}

impl From<io::Error> for TrackerCliError {
    fn from(e: io::Error) -> Self {
        TrackerCliError::Io(e)
    }
}

impl From<ConfigError> for TrackerCliError {
    fn from(e: ConfigError) -> Self {
        TrackerCliError::Config(e)
    }
}

impl From<serde_json::Error> for TrackerCliError {
    fn from(e: serde_json::Error) -> Self {
        TrackerCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TrackerCliError> for CliError {
    fn from(e: TrackerCliError) -> Self {
        match e {
            TrackerCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            TrackerCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check --weight, --height and the --constants file".to_string()),
            },
            TrackerCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            TrackerCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct DemoReport {
    days: Vec<RecordOutcome<DaySummary>>,
    trainings: Vec<RecordOutcome<TrainingSummary>>,
}
