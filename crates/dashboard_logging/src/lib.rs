#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dash_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! prefixed with the current load cycle so that interleaved fetch results from
//! the engine thread can be matched to the refresh that requested them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Number of dashboard loads started in this process.
static LOAD_CYCLE: AtomicU64 = AtomicU64::new(0);

/// Marks the start of a new dashboard load and returns its cycle number.
pub fn next_load_cycle() -> u64 {
    LOAD_CYCLE.fetch_add(1, Ordering::Relaxed) + 1
}

/// Retrieves the most recently started load cycle.
/// Returns 0 if no load has been started yet.
pub fn current_load_cycle() -> u64 {
    LOAD_CYCLE.load(Ordering::Relaxed)
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        log::trace!("[cycle {}] {}", $crate::current_load_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::current_load_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::current_load_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::current_load_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::current_load_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
