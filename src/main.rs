//! procinfo-reader - version 0.1.0
//!
//! Command-line front end for the procinfo-reader library with tracing logging.
//! This is the main entry point that resolves configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing::{debug, Level};

use cli::{Args, Commands, LogLevel};
use commands::{
    command_check, command_config, command_cpu, command_process, command_processes,
    command_system,
};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Maps the config file's `log_level` string onto the CLI enum.
fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_ascii_lowercase().as_str() {
        "off" => Some(LogLevel::Off),
        "error" => Some(LogLevel::Error),
        "warn" | "warning" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" => Some(LogLevel::Trace),
        _ => None,
    }
}

/// Initializes tracing logging subsystem with configured log level.
/// CLI > config file > warn.
fn setup_logging(config: &Config, args: &Args) {
    let level = args
        .log_level
        .clone()
        .or_else(|| config.log_level.as_deref().and_then(parse_log_level))
        .unwrap_or(LogLevel::Warn);

    let max_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Main application entry point.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    if args.check_config {
        if let Err(e) = validate_effective_config(&config) {
            eprintln!("❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        return Ok(());
    }

    if args.show_config {
        return show_config(&config, args.config_format.clone());
    }

    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }

    setup_logging(&config, &args);

    let command = args.command.unwrap_or(Commands::System {
        format: cli::OutputFormat::Text,
    });

    match command {
        Commands::System { format } => command_system(format, &config),
        Commands::Processes { limit, format } => command_processes(limit, format, &config),
        Commands::Process { pid, format } => command_process(pid, format, &config),
        Commands::Cpu {
            core,
            all_cores,
            interval_ms,
        } => command_cpu(core, all_cores, interval_ms, &config),
        Commands::Check => command_check(&config),
        Commands::Config { output, format } => command_config(output, format),
    }
}
