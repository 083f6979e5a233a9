//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) emits `tracing` events for the console
/// and log file; [`MemoryLog`](super::memory::MemoryLog) keeps messages in
/// memory. Command code takes `&dyn Log` and works with either.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
