//! Leveled-logging collaborator interface.
//!
//! The tracker itself emits no log calls. Workers and other framework
//! components report progress through an injected [`LogSink`], a single
//! leveled-write operation taking a message template with `{placeholder}`
//! markers and a key-value substitution context.
//!
//! Two implementations are provided: [`StandardLogger`], which writes
//! formatted lines to a log file or stderr with level-conditional
//! verbosity, and [`TracingSink`], which forwards records to the
//! [`tracing`] ecosystem.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;

/// Severity of a log record, from least to most severe.
///
/// The eight standard syslog levels. `Display` renders the lowercase
/// name used in formatted log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Detailed debug information.
    Debug,
    /// Interesting events (job picked up, job finished).
    Info,
    /// Normal but significant events.
    Notice,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Critical conditions.
    Critical,
    /// Action must be taken immediately.
    Alert,
    /// System is unusable.
    Emergency,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Alert => "alert",
            Self::Emergency => "emergency",
        };
        f.write_str(name)
    }
}

/// A leveled logging sink.
///
/// `message` may contain `{placeholder}` markers that are filled from
/// `context` via [`interpolate`]. Implementations decide destination and
/// filtering; callers hold an `Arc<dyn LogSink>` and stay decoupled from
/// both.
pub trait LogSink: Send + Sync {
    /// Logs a message at the given level, substituting context values
    /// into the template.
    fn log(&self, level: LogLevel, message: &str, context: &[(&str, String)]);
}

/// Fills `{key}` placeholders in `message` with the matching context
/// values. Markers with no matching key are left untouched.
///
/// # Examples
///
/// ```
/// use jobtrack::logging::interpolate;
///
/// let line = interpolate(
///     "job {id} finished in {secs}s",
///     &[("id", "42".to_string()), ("secs", "3".to_string())],
/// );
/// assert_eq!(line, "job 42 finished in 3s");
/// ```
pub fn interpolate(message: &str, context: &[(&str, String)]) -> String {
    let mut out = message.to_string();
    for (key, value) in context {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// File-or-stream logger with level-conditional verbosity.
///
/// In verbose mode, every level is written and lines carry a timestamp:
/// `[level] [HH:MM:SS YYYY-MM-DD] message`. In non-verbose mode, `Info`
/// and `Debug` records are suppressed and lines omit the timestamp:
/// `[level] message`.
///
/// Construction takes an optional log-file path; when the file cannot be
/// opened for append, the logger falls back to stderr.
pub struct StandardLogger {
    verbose: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl StandardLogger {
    /// Creates a logger writing to `logfile`, or to stderr when no path
    /// is given or the file cannot be opened for append.
    pub fn new(verbose: bool, logfile: Option<&Path>) -> Self {
        let out: Box<dyn Write + Send> = match logfile.and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        }) {
            Some(file) => Box::new(file),
            None => Box::new(io::stderr()),
        };
        Self::with_writer(verbose, out)
    }

    /// Creates a logger writing to an arbitrary sink.
    pub fn with_writer(verbose: bool, writer: Box<dyn Write + Send>) -> Self {
        Self {
            verbose,
            out: Mutex::new(writer),
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }
}

impl LogSink for StandardLogger {
    fn log(&self, level: LogLevel, message: &str, context: &[(&str, String)]) {
        let rendered = interpolate(message, context);
        if self.verbose {
            let stamp = Utc::now().format("%T %Y-%m-%d");
            self.write_line(&format!("[{level}] [{stamp}] {rendered}\n"));
        } else if !matches!(level, LogLevel::Info | LogLevel::Debug) {
            self.write_line(&format!("[{level}] {rendered}\n"));
        }
    }
}

impl fmt::Debug for StandardLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardLogger")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// Adapter forwarding log records to the [`tracing`] ecosystem.
///
/// The eight syslog levels map onto `tracing`'s five: everything at
/// `Error` and above becomes a `tracing` error event, `Notice` folds
/// into info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str, context: &[(&str, String)]) {
        let rendered = interpolate(message, context);
        match level {
            LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical | LogLevel::Error => {
                tracing::error!(target: "jobtrack", "{rendered}");
            }
            LogLevel::Warning => tracing::warn!(target: "jobtrack", "{rendered}"),
            LogLevel::Notice | LogLevel::Info => tracing::info!(target: "jobtrack", "{rendered}"),
            LogLevel::Debug => tracing::debug!(target: "jobtrack", "{rendered}"),
        }
    }
}
