//! CLI arguments for psdiff.
//!
//! This module defines the command-line interface structure using the
//! clap library. The four operating modes (save, print, compare, delete)
//! are mutually exclusive; running with no mode diffs the latest saved
//! snapshot against the live process table.

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "psdiff",
    about = "Snapshot the process table and report churn between two points in time",
    long_about = "Snapshot the process table and report churn between two points in time.\n\n\
                  Saves numbered snapshots of the running process list and prints the\n\
                  symmetric difference between any two of them, or between a snapshot and\n\
                  the live table: processes that appeared are prefixed '+', processes that\n\
                  terminated are prefixed '-'. With no arguments, compares the latest saved\n\
                  snapshot against the live process table.",
    version = "0.1.0",
    group(ArgGroup::new("mode").multiple(false))
)]
pub struct Args {
    /// Save a new snapshot, under the explicit number N when given
    #[arg(
        short = 's',
        long = "save",
        value_name = "N",
        num_args = 0..=1,
        allow_hyphen_values = true,
        group = "mode"
    )]
    pub save: Option<Option<i64>>,

    /// Print snapshot N, or the live process table when N is omitted
    #[arg(
        short = 'p',
        long = "print",
        value_name = "N",
        num_args = 0..=1,
        allow_hyphen_values = true,
        group = "mode"
    )]
    pub print: Option<Option<i64>>,

    /// Diff snapshot N1 against snapshot N2, or against the live table when N2 is omitted
    #[arg(
        short = 'c',
        long = "compare",
        value_names = ["N1", "N2"],
        num_args = 0..=2,
        allow_hyphen_values = true,
        group = "mode"
    )]
    pub compare: Option<Vec<i64>>,

    /// Delete all saved snapshots after interactive confirmation
    #[arg(long, group = "mode")]
    pub delete: bool,

    /// Snapshot directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Snapshot filename prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Directory size in bytes above which a maintenance warning is emitted
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Read the process table from an alternate proc root
    #[arg(long, value_name = "PATH", hide = true)]
    pub proc_root: Option<PathBuf>,
}
