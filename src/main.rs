// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::StyleParameters;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;

mod app_config;
mod app_controller;
mod classifier;
mod docx;
mod errors;
mod file_utils;
mod formatter;

/// CLI Wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reformat a screenplay document (default command)
    #[command(alias = "format")]
    Format(FormatArgs),

    /// Generate shell completions for screenright
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the current parameters to the user configuration directory
    InitParams,
}

#[derive(Parser, Debug)]
struct FormatArgs {
    /// Input .docx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (single-file mode only; defaults to <input>_out.docx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parameter file path (defaults to the user configuration file)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ScreenRight - screenplay formatter for Word documents
///
/// Reformats an existing .docx screenplay into an industry-standard layout:
/// classifies every paragraph (scene heading, character cue, parenthetical,
/// dialogue, action) and applies role-specific indentation, casing, font and
/// spacing, collapsing redundant blank paragraphs and stamping page numbers.
#[derive(Parser, Debug)]
#[command(name = "screenright")]
#[command(version = "1.0.0")]
#[command(about = "Screenplay formatter for Word documents")]
#[command(long_about = "ScreenRight reformats .docx screenplays into an industry-standard layout.

EXAMPLES:
    screenright script.docx                      # Format using user parameters
    screenright -o final.docx script.docx        # Explicit output path
    screenright -p parameters.txt script.docx    # Explicit parameter file
    screenright /screenplays/                    # Format every .docx in a directory
    screenright --log-level debug script.docx    # Verbose classification logging
    screenright init-params                      # Write the default parameter file
    screenright completions bash > sr.bash       # Generate bash completions

CONFIGURATION:
    Parameters are plain 'Key: Value' lines. Defaults are built in and are
    overridden by the user file (e.g. ~/.config/ScreenRight/parameters.txt)
    or by an explicit --params file. Keys cover the start keyword, scene
    marker, font, font size, line spacing, and per-role left/right indents.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .docx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file path (single-file mode only; defaults to <input>_out.docx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parameter file path (defaults to the user configuration file)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after parsing the command line.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "screenright", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitParams) => {
            let params = StyleParameters::load(None)?;
            let path = params.save_user_parameters()?;
            info!("Parameter file written to: {}", path.display());
            Ok(())
        }
        Some(Commands::Format(args)) => run_format(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            run_format(FormatArgs {
                input_path,
                output: cli.output,
                params: cli.params,
                log_level: cli.log_level,
            })
        }
    }
}

fn run_format(options: FormatArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let params = StyleParameters::load(options.params.as_deref())?;
    let controller = Controller::with_params(params);

    if options.input_path.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output cannot be combined with a directory input"));
        }
        controller.run_folder(&options.input_path)?;
        Ok(())
    } else {
        let output_file = options
            .output
            .unwrap_or_else(|| FileManager::default_output_path(&options.input_path));
        controller.run(&options.input_path, &output_file)?;
        Ok(())
    }
}
