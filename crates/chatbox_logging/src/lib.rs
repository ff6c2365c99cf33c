#![deny(missing_docs)]
//! Shared logging utilities for the chatbox workspace.
//!
//! This crate provides the `chatbox_*` logging macros used across the widget
//! crates, a per-thread request id that backend log lines can carry, and a
//! minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Id of the backend request being processed on this thread, 0 when idle.
    static REQUEST_ID: Cell<u64> = const { Cell::new(0) };
}

/// Records the backend request id handled by the current thread.
pub fn set_request_id(request_id: u64) {
    REQUEST_ID.with(|v| v.set(request_id));
}

/// Clears the request id of the current thread.
pub fn clear_request_id() {
    REQUEST_ID.with(|v| v.set(0));
}

/// Returns the request id set on the current thread, if any.
pub fn current_request_id() -> Option<u64> {
    match REQUEST_ID.with(|v| v.get()) {
        0 => None,
        id => Some(id),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! chatbox_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! chatbox_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! chatbox_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message, prefixed with the current request id when set.
#[macro_export]
macro_rules! chatbox_warn {
    ($($arg:tt)*) => {{
        match $crate::current_request_id() {
            Some(id) => log::warn!("[req {}] {}", id, format_args!($($arg)*)),
            None => log::warn!($($arg)*),
        }
    }};
}

/// Logs an error-level message, prefixed with the current request id when set.
#[macro_export]
macro_rules! chatbox_error {
    ($($arg:tt)*) => {{
        match $crate::current_request_id() {
            Some(id) => log::error!("[req {}] {}", id, format_args!($($arg)*)),
            None => log::error!($($arg)*),
        }
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
