//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the GeneraList skill backend.

use tracing::{info, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{GeneraListError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "generalist.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| GeneraListError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log one completed turn
pub fn log_turn(
    user_id: &str,
    request_type: &str,
    intent: Option<&str>,
    task_before: &str,
    task_after: &str,
    ends_session: bool,
) {
    info!(
        user_id = user_id,
        request_type = request_type,
        intent = intent,
        task_before = task_before,
        task_after = task_after,
        ends_session = ends_session,
        "Turn handled"
    );
}

/// Log a write against the list store
pub fn log_list_write(user_id: &str, list_name: &str, operation: &str, number_of_steps: Option<u32>) {
    debug!(
        user_id = user_id,
        list_name = list_name,
        operation = operation,
        number_of_steps = number_of_steps,
        "List store write"
    );
}

/// Log a backend failure that ended a turn
pub fn log_store_failure(user_id: &str, stage: &str, error: &GeneraListError) {
    error!(
        user_id = user_id,
        stage = stage,
        severity = %error.severity(),
        error = %error,
        "Store failure, ending turn"
    );
}
