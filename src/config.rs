//! Configuration management for psdiff.
//!
//! This module handles loading, merging, and validating configuration
//! from files and CLI arguments. It supports YAML, JSON, and TOML
//! formats with the precedence CLI > config file > defaults.

use crate::cli::{Args, ConfigFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Default configuration constants
pub const DEFAULT_DIR: &str = ".psdiff";
pub const DEFAULT_PREFIX: &str = "ps";
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Effective configuration for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the numbered snapshot files
    #[serde(alias = "snapshot-dir")]
    pub snapshot_dir: Option<PathBuf>,

    /// Snapshot filename prefix (files are named `<prefix>.<N>`)
    pub prefix: Option<String>,

    /// Advisory size threshold for the snapshot directory, in bytes
    #[serde(alias = "max-bytes")]
    pub max_bytes: Option<u64>,

    /// Log level
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,

    /// Alternate proc root (synthetic process trees for testing)
    #[serde(alias = "proc-root", skip_serializing_if = "Option::is_none")]
    pub proc_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_dir: Some(PathBuf::from(DEFAULT_DIR)),
            prefix: Some(DEFAULT_PREFIX.to_string()),
            max_bytes: Some(DEFAULT_MAX_BYTES),
            log_level: Some("warn".into()),
            proc_root: None,
        }
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(prefix) = cfg.prefix.as_deref() {
        if prefix.is_empty() {
            return Err("prefix must not be empty".into());
        }
        if prefix.contains(std::path::MAIN_SEPARATOR) || prefix.contains('/') {
            return Err(format!("prefix must not contain a path separator: '{prefix}'").into());
        }
    }

    if cfg.max_bytes == Some(0) {
        return Err("max_bytes must be greater than zero".into());
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref().and_then(|p| p.to_str()))?
    };

    // Override with CLI args
    if let Some(dir) = &args.dir {
        config.snapshot_dir = Some(dir.clone());
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = Some(prefix.clone());
    }
    if let Some(max_bytes) = args.max_bytes {
        config.max_bytes = Some(max_bytes);
    }
    if let Some(proc_root) = &args.proc_root {
        config.proc_root = Some(proc_root.clone());
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = if let Some(p) = path {
        PathBuf::from(p)
    } else {
        // Try default locations
        let defaults = [
            "/etc/psdiff/psdiff.yaml",
            "/etc/psdiff/psdiff.yml",
            "/etc/psdiff/psdiff.json",
            "./psdiff.yaml",
            "./psdiff.yml",
            "./psdiff.json",
        ];

        defaults
            .iter()
            .find(|p| Path::new(p).exists())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(""))
    };

    if !path.exists() || path.to_string_lossy().is_empty() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    println!("{output}");
    Ok(())
}
