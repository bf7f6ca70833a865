//! CLI argument definitions for the meal filter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use meal_cli::request::{RangeArg, parse_range_arg};

#[derive(Parser)]
#[command(
    name = "meal-filter",
    version,
    about = "Search and filter meal tables by nutrition and price",
    long_about = "Search and filter meal tables by nutrition and price.\n\n\
                  Reads a meal table (JSON or CSV), a weekly menu, or any JSON array\n\
                  of objects, and prints the records matching the requested filters."
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
    /// Filter a table and print the matching records.
    Filter(FilterArgs),

    /// List the numeric filter fields and their suggested ranges.
    Fields(FieldsArgs),

    /// Replay a timed event script through a filter session.
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct TableArgs {
    /// Table to filter.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// What the input file contains.
    #[arg(long = "kind", value_enum, default_value = "meals")]
    pub kind: TableKindArg,

    /// Filter settings file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field searched by free text; repeat for several (overrides config).
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,
}

#[derive(Parser)]
pub struct FilterArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Case-insensitive text to look for in the search fields.
    #[arg(long = "search", short = 's', value_name = "TEXT")]
    pub search: Option<String>,

    /// Numeric range, e.g. `calories=400..1000`, `protein=20..`, `price=..12.5`.
    #[arg(
        long = "range",
        short = 'r',
        value_name = "FIELD=MIN..MAX",
        value_parser = parse_range_arg
    )]
    pub ranges: Vec<RangeArg>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ViewFormatArg,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Filter settings file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// JSON-lines event script.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableKindArg {
    /// JSON array or CSV file of meals.
    Meals,
    /// Weekly menu document.
    Menu,
    /// Any JSON array of objects.
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewFormatArg {
    Table,
    Json,
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
