//! CLI argument definitions for the rule report merge tool.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rrm",
    version,
    about = "Join a rule report CSV with a rules export on rule href",
    long_about = "Join a rule report CSV with a rules export CSV.\n\n\
                  Rows are matched on the rule href, ignoring the active/draft\n\
                  provisioning segment, and the matched rule columns (minus the\n\
                  href and rule-set metadata) are appended to each report row.\n\
                  The combined table is written next to the report file."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: MergeArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

#[derive(Parser)]
pub struct MergeArgs {
    /// Path to the report CSV file.
    #[arg(long = "report", value_name = "PATH")]
    pub report: PathBuf,

    /// Path to the rules CSV file.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: PathBuf,

    /// Also write a JSON projection of the combined output.
    #[arg(long = "json")]
    pub json: bool,
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
