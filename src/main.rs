// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use srtconv::app_config::{self, Config};
use srtconv::app_controller::{ConversionReport, Controller};
use srtconv::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtconv
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtconv - SubRip subtitle converter
///
/// Converts one SRT file into WebVTT, SBV, TTML, DFXP, SCC, SMI, SAMI,
/// MPL2, TMPlayer and LRC files.
#[derive(Parser, Debug)]
#[command(name = "srtconv")]
#[command(version)]
#[command(about = "Convert SRT subtitles to ten caption formats")]
#[command(long_about = "srtconv reads a SubRip (.srt) file and writes the same captions in every supported format.

EXAMPLES:
    srtconv movie.srt                          # Write movie.vtt, movie.sbv, ... next to the current directory
    srtconv -o out/ movie.srt                  # Write into out/ (created if needed)
    srtconv --language fr-FR movie.srt         # Tag TTML/DFXP/SAMI output as French
    srtconv -l debug movie.srt                 # Verbose logging
    srtconv completions bash > srtconv.bash    # Generate bash completions

OUTPUT FORMATS:
    markup formats      vtt, dfxp, ttml, scc, sami, smi
    plain-text formats  sbv, mpl, tmp, lrc")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file
    #[arg(value_name = "INPUT_SRT")]
    input_path: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Caption language tag (e.g., 'en-US', 'fr')
    #[arg(long)]
    language: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Filtering happens through log::max_level so it can change after init
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Label and ANSI color for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "\x1B[1;31m"),
            Level::Warn => ("WARN ", "\x1B[1;33m"),
            Level::Info => ("INFO ", "\x1B[1;32m"),
            Level::Debug => ("DEBUG", "\x1B[1;36m"),
            Level::Trace => ("TRACE", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (label, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Warnings and errors show up even before the config is read
    if let Err(e) = CustomLogger::init(LevelFilter::Warn) {
        eprintln!("Error: failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtconv", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_convert(cli) {
        Ok(report) => {
            print_report(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                for family in report.failed_families() {
                    eprintln!("Error: no {} could be written", family);
                }
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_convert(options: CommandLineOptions) -> Result<ConversionReport, AppError> {
    let input_path = options
        .input_path
        .ok_or_else(|| AppError::Config("INPUT_SRT is required when no subcommand is specified".to_string()))?;

    let config = load_config(options.config.as_deref(), options.log_level, options.language)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using caption language '{}'", config.language);

    let controller = Controller::with_config(config);
    controller.run(&input_path, &options.outdir)
}

// Load the optional config file, apply CLI overrides, then validate
fn load_config(
    config_path: Option<&Path>,
    log_level: Option<CliLogLevel>,
    language: Option<String>,
) -> Result<Config, AppError> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path).map_err(|e| AppError::Config(format!("{:#}", e)))?,
        None => Config::default(),
    };

    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    if let Some(language) = language {
        config.language = language;
    }

    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    Ok(config)
}

fn print_report(report: &ConversionReport) {
    if report.outputs().is_empty() {
        return;
    }

    println!("Successfully converted to the following formats:");
    for output in report.outputs() {
        println!("  {:<5} -> {}", output.format.tag(), output.path.display());
    }
}
