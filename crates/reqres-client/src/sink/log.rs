// crates/reqres-client/src/sink/log.rs
// ============================================================================
// Module: Log Sinks
// Description: Timestamped one-line log records and their destinations.
// Purpose: Emit `LEVEL | timestamp | message` lines or JSON lines.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! A [`LogRecord`] is one line: level, UTC timestamp, message. Writer-backed
//! sinks encode it as `LEVEL | YYYY-MM-DD HH:MM:SS | message` or as a JSON
//! object per line. Write failures are swallowed.

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::LogSink;

/// Timestamp layout used in rendered log lines.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// ============================================================================
// SECTION: Records
// ============================================================================

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Normal exchange records.
    Info,
    /// Degraded observability, e.g. an attachment that could not render.
    Warn,
    /// Failures reported by callers.
    Error,
}

impl LogLevel {
    /// Returns the upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// UTC timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Message body.
    pub message: String,
}

impl LogRecord {
    /// Creates a record stamped with the current UTC time.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(level, OffsetDateTime::now_utc(), message)
    }

    /// Creates a record stamped with an explicit time.
    #[must_use]
    pub fn at(level: LogLevel, when: OffsetDateTime, message: impl Into<String>) -> Self {
        let timestamp =
            when.format(TIMESTAMP_FORMAT).unwrap_or_else(|_| when.unix_timestamp().to_string());
        Self {
            level,
            timestamp,
            message: message.into(),
        }
    }

    /// Creates an info record stamped now.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Renders the record as `LEVEL | timestamp | message`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{} | {} | {}", self.level.as_str(), self.timestamp, self.message)
    }
}

/// Encoding used by writer-backed sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// `LEVEL | timestamp | message`.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LineFormat {
    /// Encodes a record as one line without the trailing newline.
    fn encode(self, record: &LogRecord) -> Option<String> {
        match self {
            Self::Text => Some(record.render()),
            Self::Json => serde_json::to_string(record).ok(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Log sink that writes lines to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink {
    /// Line encoding.
    format: LineFormat,
}

impl StderrLogSink {
    /// Creates a stderr sink with the given encoding.
    #[must_use]
    pub const fn new(format: LineFormat) -> Self {
        Self {
            format,
        }
    }
}

impl LogSink for StderrLogSink {
    fn record(&self, record: &LogRecord) {
        if let Some(line) = self.format.encode(record) {
            let _ = writeln!(io::stderr(), "{line}");
        }
    }
}

/// Log sink that appends lines to a file.
#[derive(Debug)]
pub struct FileLogSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
    /// Line encoding.
    format: LineFormat,
}

impl FileLogSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path, format: LineFormat) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            format,
        })
    }
}

impl LogSink for FileLogSink {
    fn record(&self, record: &LogRecord) {
        if let Some(line) = self.format.encode(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }
}

/// Log sink that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    /// Captured records in arrival order.
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of captured records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map_or_else(|_| Vec::new(), |records| records.clone())
    }

    /// Returns captured messages without level or timestamp.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|record| record.message).collect()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, record: &LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

/// Log sink that discards records.
#[derive(Debug, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn record(&self, _record: &LogRecord) {}
}
