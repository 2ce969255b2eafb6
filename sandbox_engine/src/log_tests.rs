//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry, severity filtering and DefaultLogger.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::Mutex;
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "sandbox::Test".to_string(),
        message: format!("{:?} message", severity),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_deserializes_lowercase() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        level: LogSeverity,
    }

    let parsed: Wrapper = toml::from_str("level = \"warn\"").unwrap();
    assert_eq!(parsed.level, LogSeverity::Warn);
    assert!(toml::from_str::<Wrapper>("level = \"loud\"").is_err());
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_file_line() {
    let e = entry(LogSeverity::Error, Some("device_resources.rs"), Some(42));
    assert_eq!(e.severity, LogSeverity::Error);
    assert_eq!(e.source, "sandbox::Test");
    assert_eq!(e.file, Some("device_resources.rs"));
    assert_eq!(e.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let e1 = entry(LogSeverity::Warn, Some("loader.rs"), Some(10));
    let e2 = e1.clone();
    assert_eq!(e1.severity, e2.severity);
    assert_eq!(e1.message, e2.message);
    assert_eq!(e1.line, e2.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_accepts_everything_by_default() {
    let logger = DefaultLogger::default();
    assert!(logger.accepts(LogSeverity::Trace));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_min_severity_filter() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Warn);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(!logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Warn));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger::default();
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Just verify neither branch panics
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("test.rs"), Some(7)));
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    count: Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_receives_entries() {
    let logger = CountingLogger { count: Mutex::new(0) };
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Error, Some("x.rs"), Some(1)));
    assert_eq!(*logger.count.lock().unwrap(), 2);
}

#[test]
fn test_logger_is_object_safe() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger::with_min_severity(LogSeverity::Error));
    logger.log(&entry(LogSeverity::Debug, None, None));
}
