//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "exitlist",
    version,
    about = "Reconcile and serve the list of companies that exited Russia",
    long_about = "Merge the structured company export with the tables scraped from the \n\
                  public exit list page, keyed by company slug, and store the result.\n\
                  Stored records can be read back one company at a time or as a full scan."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file (EXITLIST_* variables and flags override it).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize both sources, merge them and write the table.
    Sync(SyncArgs),

    /// Print one stored company by slug.
    Get(GetArgs),

    /// Print every stored company.
    List(TableArgs),
}

/// Location of the stored table.
#[derive(Args, Clone, Default)]
pub struct TableArgs {
    /// Table file to read or write.
    #[arg(long = "store", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Table name recorded in the table file.
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct SyncArgs {
    /// Structured export JSON file.
    #[arg(long = "structured", value_name = "PATH")]
    pub structured: Option<PathBuf>,

    /// Page to scrape.
    #[arg(long = "url", value_name = "URL", conflicts_with = "html_file")]
    pub url: Option<String>,

    /// Read the page from a saved HTML file instead of fetching it.
    #[arg(long = "html-file", value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Merge and report without touching the table file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the invocation result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct GetArgs {
    /// Company slug, e.g. `raytheon-technologies`.
    #[arg(value_name = "SLUG")]
    pub slug: String,

    #[command(flatten)]
    pub table: TableArgs,
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
