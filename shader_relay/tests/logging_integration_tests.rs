//! Integration tests for the relay logging system
//!
//! These tests swap the process-wide logger, so every test runs serially.
//!
//! Run with: cargo test --test logging_integration_tests

use shader_relay::relay::log::{self, LogEntry, LogSeverity, Logger};
use shader_relay::relay::protocol::JobSet;
use shader_relay::relay::{BatchCoordinator, Error, Job, OutputFormats, RelayConfig, Result};
use shader_relay::{relay_bail, relay_err, relay_error, relay_info, relay_warn};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

/// Captured entries emitted under `source`
fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGER CONTROL TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    relay_info!("test::module", "Test info message");
    relay_warn!("test::module", "Test warning {}", 2);
    relay_error!("test::module", "Test error message");

    let captured = from_source(&entries, "test::module");
    assert_eq!(captured.len(), 3);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].message, "Test info message");
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[1].message, "Test warning 2");
    assert_eq!(captured[2].severity, LogSeverity::Error);
    assert_eq!(captured[2].message, "Test error message");

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    relay_error!("test::error", "Critical error occurred");
    relay_info!("test::error", "No location for info");

    let captured = from_source(&entries, "test::error");
    assert_eq!(captured.len(), 2);
    assert!(captured[0].file.unwrap().ends_with("logging_integration_tests.rs"));
    assert!(captured[0].line.is_some());
    assert_eq!(captured[1].file, None);
    assert_eq!(captured[1].line, None);

    log::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    relay_info!("test::reset", "Before reset");
    log::reset_logger();
    relay_info!("test::reset", "After reset");

    let captured = from_source(&entries, "test::reset");
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "Before reset");
}

#[test]
#[serial]
fn test_integration_min_severity_filters_entries() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);
    log::set_min_severity(LogSeverity::Warn);
    assert_eq!(log::min_severity(), LogSeverity::Warn);

    relay_info!("test::filter", "Dropped");
    relay_warn!("test::filter", "Kept warning");
    relay_error!("test::filter", "Kept error");

    log::set_min_severity(LogSeverity::Trace);
    log::reset_logger();

    let captured = from_source(&entries, "test::filter");
    let messages: Vec<&str> = captured.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["Kept warning", "Kept error"]);
}

// ============================================================================
// ERROR MACRO TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_relay_err_logs_and_returns_error() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let err = relay_err!("test::err", Error::InvalidConfig("root directory is empty".to_string()));

    let captured = from_source(&entries, "test::err");
    log::reset_logger();

    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].message, err.to_string());
    assert!(captured[0].file.is_some());
}

#[test]
#[serial]
fn test_integration_relay_bail_returns_early() {
    fn decode(len: usize) -> Result<usize> {
        if len < 0x704 {
            relay_bail!("test::bail", Error::MalformedControlBlock { len, required: 0x704 });
        }
        Ok(len)
    }

    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    assert_eq!(decode(0x800).unwrap(), 0x800);
    assert!(matches!(decode(8), Err(Error::MalformedControlBlock { len: 8, .. })));

    let captured = from_source(&entries, "test::bail");
    log::reset_logger();

    assert_eq!(captured.len(), 1);
    assert!(captured[0].message.contains("8 bytes"));
}

// ============================================================================
// RELAY COMPONENT LOGGING
// ============================================================================

#[test]
#[serial]
fn test_integration_duplicate_job_with_different_source_warns() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let jobs: JobSet = vec![
        Job::new("a.frag", b"first".to_vec()),
        Job::new("a.frag", b"first".to_vec()),
        Job::new("a.frag", b"second".to_vec()),
    ]
    .into_iter()
    .collect();

    let captured = from_source(&entries, "shader_relay::JobSet");
    log::reset_logger();

    assert_eq!(jobs.len(), 1);
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Debug);
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert!(captured[1].message.contains("a.frag"));
}

#[test]
#[serial]
fn test_integration_empty_batch_logs_debug() {
    let (test_logger, entries) = TestLogger::new();
    log::set_logger(test_logger);

    let relay = BatchCoordinator::new(RelayConfig::new("unused-root")).unwrap();
    let outputs = relay.compile(Vec::new(), OutputFormats::NV).unwrap();

    let captured = from_source(&entries, "shader_relay::Batch");
    log::reset_logger();

    assert!(outputs.is_empty());
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Debug);
}
