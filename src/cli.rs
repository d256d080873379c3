//! CLI arguments and subcommands for procinfo-reader.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
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

/// Output format for snapshot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "procinfo-reader",
    about = "Read typed process and system statistics from /proc",
    long_about = "Read typed process and system statistics from /proc.\n\n\
                  Reports per-process command line, virtual memory, owner, CPU usage and \
                  thread counts, and system-wide uptime, kernel and OS identification, core \
                  count, process counters, memory usage and CPU usage over an interval.",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (overrides config; default: warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Process-information root (default: /proc)
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Account database used to resolve uids (default: /etc/passwd)
    #[arg(long)]
    pub passwd: Option<PathBuf>,

    /// Decimal places for percentages and megabytes
    #[arg(long)]
    pub precision: Option<usize>,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show system-wide statistics
    System {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List processes with their statistics
    Processes {
        /// Maximum number of processes to show (overrides config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show statistics of a single process
    Process {
        /// Process id
        pid: u32,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Measure CPU usage over an interval
    Cpu {
        /// Single core to measure instead of the aggregate
        #[arg(long, conflicts_with = "all_cores")]
        core: Option<usize>,

        /// Measure every core and the aggregate
        #[arg(long)]
        all_cores: bool,

        /// Interval between the two samples in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Validate that /proc and the account database can be parsed
    Check,

    /// Generate a configuration file
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,
    },
}
