//! CLI argument definitions for the attribute mapper.

use std::path::PathBuf;

use attrmap_rules::CsvOptions;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "attrmap",
    version,
    about = "Normalize supplier product attributes with a rule table",
    long_about = "Normalize supplier product attributes into canonical marketplace attributes.\n\n\
                  Rules are read from a delimited table (see `attrmap rules`); products are\n\
                  read from JSON and mapped results are written as JSON."
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
    /// Map every product in a JSON file.
    Map(MapArgs),

    /// Load and validate a rule table without mapping anything.
    Rules(RulesArgs),
}

/// Where the rule table comes from.
#[derive(Args)]
pub struct RuleSourceArgs {
    /// Rule table path (default: $ATTRMAP_RULES).
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Field delimiter of the rule table.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ';')]
    pub delimiter: char,
}

impl RuleSourceArgs {
    /// CSV reader options, or `None` when the delimiter is not a single ASCII byte.
    pub fn csv_options(&self) -> Option<CsvOptions> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .map(|delimiter| CsvOptions { delimiter })
    }
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub source: RuleSourceArgs,

    /// Products JSON: `[{"title", "category_id", "attributes": [{"name", "value", "unit"}]}]`.
    #[arg(long = "input", value_name = "PRODUCTS")]
    pub input: PathBuf,

    /// Output JSON path (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    pub source: RuleSourceArgs,
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
