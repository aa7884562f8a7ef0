//! Logging utilities for the storefront services.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace: a console subscriber, optionally teed into a daily
//! rolling file.

use std::str::FromStr;
use storefront_config::LoggingConfig;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Directive prefix covering every `storefront_*` crate target.
const CRATE_TARGET: &str = "storefront";

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("{}={}", CRATE_TARGET, level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialize the tracing subscriber with a specific log level.
///
/// ```
/// storefront_common::init_with_level(tracing::Level::DEBUG);
/// ```
///
/// `RUST_LOG` directives are honoured in addition to `storefront=<level>`.
pub fn init_with_level(level: Level) {
    // try_init: a global default subscriber may already be set (tests)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `[logging]` config section.
///
/// With `log_dir` set, records are additionally written to a daily rolling
/// file `storefront.log` through a non-blocking writer. The returned guard
/// must be kept alive for the lifetime of the process, dropping it flushes
/// and stops the writer.
pub fn init_from_config(config: Option<&LoggingConfig>) -> Option<WorkerGuard> {
    let level = config
        .and_then(|c| c.level.as_deref())
        .and_then(|l| Level::from_str(l).ok())
        .unwrap_or(Level::INFO);

    let Some(log_dir) = config.and_then(|c| c.log_dir.as_deref()) else {
        init_with_level(level);
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(log_dir, "storefront.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {} (files in {})", level, log_dir);
    }
    Some(guard)
}
