//! Log setup for the chatbox host.
//!
//! The console is the chat transcript, so logs go to a file unless the
//! config asks for the terminal.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// The configured log file only.
    #[default]
    File,
    /// Stderr only.
    Terminal,
    Both,
}

impl LogDestination {
    fn wants_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn wants_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs the global logger. A log file that cannot be created falls back to stderr.
pub fn initialize(destination: LogDestination, log_file: &Path, level: LevelFilter) {
    let loggers = build_loggers(destination, log_file, level);
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(
    destination: LogDestination,
    log_file: &Path,
    level: LevelFilter,
) -> Vec<Box<dyn SharedLogger>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut terminal = destination.wants_terminal();

    if destination.wants_file() {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(level, record_config(), file)),
            Err(err) => {
                eprintln!("chatbox: cannot write log file {}: {err}", log_file.display());
                terminal = true;
            }
        }
    }
    if terminal {
        loggers.push(TermLogger::new(
            level,
            record_config(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    loggers
}

fn record_config() -> Config {
    // Transport crates log every connection at debug level.
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build()
}
