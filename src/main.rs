//! psdiff - version 0.1.0
//!
//! Process table snapshot and churn diff tool. This is the main entry
//! point that resolves configuration, initializes logging, and dispatches
//! the selected operating mode.

mod cli;
mod commands;
mod config;

use clap::Parser;
use psdiff::SnapshotStore;
use std::path::PathBuf;
use tracing::Level;

use cli::{Args, LogLevel};
use commands::{command_compare, command_delete, command_print, command_save};
use config::{
    resolve_config, show_config, validate_effective_config, Config, DEFAULT_DIR,
    DEFAULT_MAX_BYTES, DEFAULT_PREFIX, DEFAULT_PROC_ROOT,
};

/// Initializes tracing logging subsystem with configured log level.
///
/// The subscriber writes to stderr: stdout carries snapshot listings and
/// diff reports, and advisory warnings must not corrupt them.
fn setup_logging(_config: &Config, args: &Args) {
    let log_level = match args.log_level {
        LogLevel::Off => Level::ERROR,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Main application entry point.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("Configuration invalid: {e}");
                std::process::exit(1);
            }
            println!("Configuration is valid");
            return Ok(());
        }

        return show_config(&config, args.config_format);
    }

    let config = resolve_config(&args)?;

    if let Err(e) = validate_effective_config(&config) {
        eprintln!("Configuration invalid: {e}");
        std::process::exit(1);
    }

    setup_logging(&config, &args);

    let store = SnapshotStore::new(
        config
            .snapshot_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR)),
        config
            .prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
        config.max_bytes.unwrap_or(DEFAULT_MAX_BYTES),
    );
    store.ensure_dir()?;

    let proc_root = config
        .proc_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT));

    let result = if let Some(explicit) = args.save {
        command_save(&store, &proc_root, explicit)
    } else if let Some(number) = args.print {
        command_print(&store, &proc_root, number)
    } else if let Some(numbers) = &args.compare {
        command_compare(&store, &proc_root, numbers)
    } else if args.delete {
        command_delete(&store)
    } else {
        // Default mode: latest saved snapshot against the live table.
        command_compare(&store, &proc_root, &[])
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
    Ok(())
}
