//! In-memory logger.
use std::sync::Mutex;

use super::types::Log;

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Stage header.
    Stage,
    /// Informational message.
    Info,
    /// Debug message.
    Debug,
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// A single recorded log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: Level,
    /// Message text as logged.
    pub message: String,
}

impl LogEntry {
    /// Re-emit this entry as a `tracing` event.
    pub fn replay(&self) {
        let msg = &self.message;
        match self.level {
            Level::Stage => tracing::info!(target: "sideload::stage", "{msg}"),
            Level::Info => tracing::info!("{msg}"),
            Level::Debug => tracing::debug!("{msg}"),
            Level::Warn => tracing::warn!("{msg}"),
            Level::Error => tracing::error!("{msg}"),
        }
    }
}

/// Implement each [`Log`] method by recording the message at the matching
/// [`Level`].
macro_rules! record_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.record(Level::$level, msg);
            }
        )+
    };
}

/// Logger that keeps every message in memory, in order.
///
/// Used to drive command code without a terminal, and to inspect what it
/// reported.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: Level, msg: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(LogEntry {
                level,
                message: msg.to_string(),
            });
        }
    }

    /// All recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages recorded at `level`, in order.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// Whether any message at `level` contains `needle`.
    #[must_use]
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }

    /// Re-emit every entry through `tracing`, in order.
    pub fn replay(&self) {
        for entry in self.entries() {
            entry.replay();
        }
    }
}

impl Log for MemoryLog {
    record_log_methods!(
        stage => Stage,
        info => Info,
        debug => Debug,
        warn => Warn,
        error => Error,
    );
}
