//! Configuration management for procinfo-reader.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use procinfo_reader::format::DEFAULT_PRECISION;
use procinfo_reader::paths::{DEFAULT_PASSWD_PATH, DEFAULT_PROC_ROOT};
use procinfo_reader::{MemoryFormula, ProcPaths, ProcessInfoReader};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_CPU_INTERVAL_MS: u64 = 1000;
pub const MAX_PRECISION: usize = 9;

/// Reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Sources
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,
    #[serde(alias = "passwd-path")]
    pub passwd_path: Option<PathBuf>,

    // Derivation
    /// Decimal places for percentages and megabytes
    pub precision: Option<usize>,
    /// Interval between the two CPU samples of the `cpu` command
    #[serde(alias = "cpu-interval-ms")]
    pub cpu_interval_ms: Option<u64>,
    /// Maximum processes listed by the `processes` command
    #[serde(alias = "max-processes")]
    pub max_processes: Option<usize>,
    /// "available-minus-buffers" | "total-minus-available"
    #[serde(alias = "memory-formula")]
    pub memory_formula: Option<MemoryFormula>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            passwd_path: Some(PathBuf::from(DEFAULT_PASSWD_PATH)),
            precision: Some(DEFAULT_PRECISION),
            cpu_interval_ms: Some(DEFAULT_CPU_INTERVAL_MS),
            max_processes: None,
            memory_formula: Some(MemoryFormula::default()),
            log_level: Some("warn".into()),
        }
    }
}

impl Config {
    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn cpu_interval_ms(&self) -> u64 {
        self.cpu_interval_ms.unwrap_or(DEFAULT_CPU_INTERVAL_MS)
    }

    pub fn proc_paths(&self) -> ProcPaths {
        ProcPaths::new(
            self.proc_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT)),
            self.passwd_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PASSWD_PATH)),
        )
    }

    /// Builds the reader described by this configuration.
    pub fn reader(&self) -> ProcessInfoReader {
        ProcessInfoReader::new(self.proc_paths())
            .with_memory_formula(self.memory_formula.unwrap_or_default())
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.precision() > MAX_PRECISION {
        return Err(format!(
            "precision must be at most {}, got {}",
            MAX_PRECISION,
            cfg.precision()
        )
        .into());
    }

    if cfg.cpu_interval_ms() == 0 {
        return Err("cpu_interval_ms must be greater than 0".into());
    }

    if cfg.max_processes == Some(0) {
        return Err("max_processes must be greater than 0 when set".into());
    }

    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".into());
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(passwd) = &args.passwd {
        config.passwd_path = Some(passwd.clone());
    }
    if let Some(precision) = args.precision {
        config.precision = Some(precision);
    }

    Ok(config)
}

/// Configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => {
            // Try default locations
            let defaults = [
                "/etc/procinfo-reader/config.yaml",
                "/etc/procinfo-reader/config.yml",
                "/etc/procinfo-reader/config.json",
                "./procinfo-reader.yaml",
                "./procinfo-reader.yml",
                "./procinfo-reader.json",
                "./procinfo-reader.toml",
            ];

            match defaults.iter().map(Path::new).find(|p| p.exists()) {
                Some(p) => p.to_path_buf(),
                None => return Ok(Config::default()),
            }
        }
    };

    let content = fs::read_to_string(&path)?;
    let config = parse_config(&path, &content)?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses configuration text, choosing the format from the file extension.
/// Anything that is not `.json` or `.toml` is read as YAML.
pub fn parse_config(path: &Path, content: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Renders configuration in the requested format
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, format)?);
    Ok(())
}
