//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "table2nmea",
    version,
    about = "Convert DR and GNSS time-series tables to NMEA-0183 sentences",
    long_about = "Convert dead-reckoning and raw GNSS tables (CSV exports) into an NMEA-0183 log.\n\n\
                  Emits GGA, RMC, GSV and GSA sentences, aligned on GPS week and time of week."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert one DR/GNSS table pair into an NMEA log file.
    Convert(ConvertArgs),

    /// Read `DR,GNSS,TYPES` lines from stdin and convert each, until `e`.
    Interactive(InteractiveArgs),

    /// List the constellations scanned for satellite columns.
    Constellations,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Dead-reckoning table (required for GGA).
    #[arg(long = "dr", value_name = "CSV")]
    pub dr: Option<PathBuf>,

    /// Raw GNSS table.
    #[arg(long = "gnss", value_name = "CSV")]
    pub gnss: Option<PathBuf>,

    /// Message types joined with `+`, e.g. `GGA+RMC+GSV`.
    #[arg(long = "types", short = 't', value_name = "SELECTOR", default_value = "GGA")]
    pub types: String,

    /// Directory for the generated NMEA file.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InteractiveArgs {
    /// Directory for the generated NMEA files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
