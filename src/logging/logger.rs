//! Structured logger writing through `tracing`.
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::types::Log;
use super::utils::log_file_path;

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger.
///
/// Every message becomes a `tracing` event. The subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) prints it to the
/// console and appends it to `$XDG_CACHE_HOME/sideload/<command>.log`
/// (default `~/.cache/sideload/<command>.log`) regardless of verbosity.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

#[allow(clippy::unused_self)]
impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display; the file itself is created by
    /// [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Create a logger whose events go to an explicit log file.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);
}
