// crates/reqres-client/src/sink/mod.rs
// ============================================================================
// Module: Trace Sinks
// Description: Log and report sinks for HTTP exchange traces.
// Purpose: Route traces to injected destinations instead of global loggers.
// Dependencies: serde_json, time
// ============================================================================

//! ## Overview
//! Two sink families receive every trace: a [`LogSink`] for one-line records
//! and a [`ReportSink`] for structured attachments. Both are infallible from
//! the caller's point of view; implementations swallow their own write
//! failures so observability never fails a call.
//! Invariants:
//! - Each traced exchange produces exactly two log records and two attachments.
//! - Sinks are `Send + Sync` and may be shared between clients.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;

use crate::trace::RequestTrace;
use crate::trace::ResponseTrace;

// ============================================================================
// SECTION: Sink Traits
// ============================================================================

/// Receives one-line log records.
pub trait LogSink: Send + Sync {
    /// Records a log entry.
    fn record(&self, record: &LogRecord);
}

/// Receives report attachments.
pub trait ReportSink: Send + Sync {
    /// Stores an attachment.
    fn attach(&self, attachment: &Attachment);
}

// ============================================================================
// SECTION: Sink Bundle
// ============================================================================

/// The pair of sinks a client reports to.
#[derive(Clone)]
pub struct TraceSinks {
    /// Line-oriented log destination.
    log: Arc<dyn LogSink>,
    /// Attachment destination.
    report: Arc<dyn ReportSink>,
}

impl TraceSinks {
    /// Bundles a log sink and a report sink.
    #[must_use]
    pub fn new(log: Arc<dyn LogSink>, report: Arc<dyn ReportSink>) -> Self {
        Self {
            log,
            report,
        }
    }

    /// Sinks that discard everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopLogSink), Arc::new(NoopReportSink))
    }

    /// Emits a request trace to both sinks.
    pub fn request(&self, trace: &RequestTrace) {
        self.log.record(&LogRecord::info(trace.log_line()));
        self.attach_json(trace.attachment_name(), trace);
    }

    /// Emits a response trace to both sinks.
    pub fn response(&self, trace: &ResponseTrace) {
        self.log.record(&LogRecord::info(trace.log_line()));
        self.attach_json(&trace.attachment_name(), trace);
    }

    /// Renders a JSON attachment; rendering failures are logged, not raised.
    fn attach_json<T: Serialize>(&self, name: &str, value: &T) {
        match Attachment::json(name, value) {
            Ok(attachment) => self.report.attach(&attachment),
            Err(err) => {
                self.log.record(&LogRecord::new(
                    LogLevel::Warn,
                    format!("attachment {name} not rendered: {err}"),
                ));
            }
        }
    }
}

impl std::fmt::Debug for TraceSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceSinks").finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Implementations
// ============================================================================

pub mod log;
pub mod report;

pub use log::FileLogSink;
pub use log::LineFormat;
pub use log::LogLevel;
pub use log::LogRecord;
pub use log::MemoryLogSink;
pub use log::NoopLogSink;
pub use log::StderrLogSink;
pub use report::Attachment;
pub use report::AttachmentType;
pub use report::DirectoryReportSink;
pub use report::MemoryReportSink;
pub use report::NoopReportSink;
