//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on the logging section of the static configuration.

use crate::config::LoggingConfig;
use tracing_appender::rolling;

/// Initialize logging system based on configuration
///
/// **Note**: This should be called only once during application startup,
/// after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
///
/// # Panics
/// * If setting the global subscriber fails (e.g., already initialized)
pub fn init_logging(config: &LoggingConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let writer: Box<dyn std::io::Write + Send + Sync> = match config.file.as_deref() {
        Some(log_file) if !log_file.is_empty() && config.enable_rotation => {
            // Use rolling log files
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let filename_str = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("vecwise-metrics.log");
            match rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename_str.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
            {
                Ok(appender) => Box::new(appender),
                Err(e) => {
                    eprintln!("[ERROR] Failed to create rolling log appender: {}", e);
                    Box::new(std::io::stdout())
                }
            }
        }
        Some(log_file) if !log_file.is_empty() => {
            // Non-rotating, append to file
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
            {
                Ok(file) => Box::new(file),
                Err(e) => {
                    eprintln!("[ERROR] Failed to open log file {}: {}", log_file, e);
                    Box::new(std::io::stdout())
                }
            }
        }
        _ => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(config.file.as_ref().is_none_or(|f| f.is_empty()));

    if config.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }

    guard
}
