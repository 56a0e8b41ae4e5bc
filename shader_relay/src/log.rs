//! Relay logging
//!
//! Every component logs through one process-wide [`Logger`], a colored
//! console logger unless replaced. Entries under the minimum severity are
//! dropped before they reach it. `relay_error!` and the error macros record
//! the call site.

use colored::*;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination of relay log entries
///
/// Install one with [`set_logger`].
///
/// # Example
///
/// ```no_run
/// use shader_relay::relay::log::{self, LogEntry, Logger};
/// use std::sync::mpsc::Sender;
/// use std::sync::Mutex;
///
/// struct ChannelLogger(Mutex<Sender<String>>);
///
/// impl Logger for ChannelLogger {
///     fn log(&self, entry: &LogEntry) {
///         if let Ok(tx) = self.0.lock() {
///             let _ = tx.send(entry.message.clone());
///         }
///     }
/// }
///
/// let (tx, _rx) = std::sync::mpsc::channel();
/// log::set_logger(ChannelLogger(Mutex::new(tx)));
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,

    /// Emitting component, `"shader_relay::<Component>"`
    pub source: String,

    pub message: String,

    /// Call site, set by `relay_error!` only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Poll iterations, per-file details
    Trace,

    /// Per-job progress
    Debug,

    /// Batch-level progress
    Info,

    /// Timeouts, duplicate names, unknown stages
    Warn,

    /// Failures (with file:line details)
    Error,
}

impl LogSeverity {
    fn as_u8(self) -> u8 {
        match self {
            LogSeverity::Trace => 0,
            LogSeverity::Debug => 1,
            LogSeverity::Info => 2,
            LogSeverity::Warn => 3,
            LogSeverity::Error => 4,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogSeverity::Trace,
            1 => LogSeverity::Debug,
            2 => LogSeverity::Info,
            3 => LogSeverity::Warn,
            _ => LogSeverity::Error,
        }
    }
}

/// Render an entry as a single console line
///
/// `[YYYY-MM-DD HH:MM:SS.mmm] [LEVEL] [source] message`, followed by
/// ` (file:line)` when the entry carries a call site.
pub fn format_entry(entry: &LogEntry) -> String {
    let local: DateTime<Local> = entry.timestamp.into();
    let level = match entry.severity {
        LogSeverity::Trace => "TRACE".bright_black(),
        LogSeverity::Debug => "DEBUG".cyan(),
        LogSeverity::Info => "INFO ".green(),
        LogSeverity::Warn => "WARN ".yellow(),
        LogSeverity::Error => "ERROR".red().bold(),
    };

    let mut line = format!(
        "[{}] [{}] [{}] {}",
        local.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        entry.source.bright_blue(),
        entry.message
    );
    if let (Some(file), Some(at)) = (entry.file, entry.line) {
        line.push_str(&format!(" ({}:{})", file, at));
    }
    line
}

/// Console logger used until [`set_logger`] installs another one
///
/// Trace to Info go to stdout; Warn and Error go to stderr.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let line = format_entry(entry);
        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== GLOBAL LOGGER =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(0);

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Replace the global logger
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut lock) = logger_lock().write() {
        *lock = Box::new(logger);
    }
}

/// Reset the global logger to DefaultLogger
pub fn reset_logger() {
    if let Ok(mut lock) = logger_lock().write() {
        *lock = Box::new(DefaultLogger);
    }
}

/// Set the minimum severity that reaches the logger
pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity.as_u8(), Ordering::Relaxed);
}

/// Current minimum severity
pub fn min_severity() -> LogSeverity {
    LogSeverity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
}

fn dispatch(entry: LogEntry) {
    if entry.severity < min_severity() {
        return;
    }
    if let Ok(lock) = logger_lock().read() {
        lock.log(&entry);
    }
}

/// Log a message without source location
///
/// Used by macros like relay_info!, relay_warn!, etc.
pub fn log(severity: LogSeverity, source: &str, message: String) {
    dispatch(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: None,
        line: None,
    });
}

/// Log a message with file:line information (for ERROR logs)
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: Some(file),
        line: Some(line),
    });
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! relay_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// shader_relay::relay_debug!("shader_relay::Publisher", "Wrote {} requests", 3);
/// ```
#[macro_export]
macro_rules! relay_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! relay_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! relay_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! relay_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log a typed error at ERROR severity and evaluate to it
///
/// # Example
///
/// ```no_run
/// use shader_relay::relay::Error;
///
/// let err = shader_relay::relay_err!("shader_relay::Codec",
///     Error::MalformedControlBlock { len: 0, required: 0x704 });
/// ```
#[macro_export]
macro_rules! relay_err {
    ($source:expr, $err:expr) => {{
        let err: $crate::relay::Error = $err;
        $crate::relay_error!($source, "{}", err);
        err
    }};
}

/// Log a typed error and return it from the enclosing function
#[macro_export]
macro_rules! relay_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::relay_err!($source, $err))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
