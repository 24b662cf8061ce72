// crates/reqres-client/src/sink/report.rs
// ============================================================================
// Module: Report Sinks
// Description: Named attachments and the destinations that store them.
// Purpose: Persist request/response traces alongside the test report.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`Attachment`] is a named JSON or text body. [`DirectoryReportSink`]
//! numbers files in arrival order so a report directory reads as a timeline
//! of the exchanges it recorded.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use serde::Serialize;

use super::ReportSink;

// ============================================================================
// SECTION: Attachments
// ============================================================================

/// Media type of an attachment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    /// Pretty-printed JSON.
    Json,
    /// Plain UTF-8 text.
    Text,
}

impl AttachmentType {
    /// Returns the MIME type.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }

    /// Returns the file extension used on disk.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

/// A named report attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Display name, e.g. `Request` or `Response [200]`.
    pub name: String,
    /// Body media type.
    pub content_type: AttachmentType,
    /// Rendered body.
    pub body: String,
}

impl Attachment {
    /// Renders `value` as a pretty-printed JSON attachment.
    ///
    /// # Errors
    ///
    /// Returns the serialization error when `value` cannot be rendered.
    pub fn json<T: Serialize>(name: &str, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.to_string(),
            content_type: AttachmentType::Json,
            body: serde_json::to_string_pretty(value)?,
        })
    }

    /// Creates a plain-text attachment.
    #[must_use]
    pub fn text(name: &str, body: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            content_type: AttachmentType::Text,
            body: body.into(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Report sink writing each attachment to `NNN-<slug>.<ext>` under a directory.
///
/// # Invariants
/// - File prefixes increase monotonically in arrival order.
#[derive(Debug)]
pub struct DirectoryReportSink {
    /// Directory receiving attachment files.
    root: PathBuf,
    /// Monotonic counter used for file prefixes.
    counter: AtomicU64,
    /// Paths written so far.
    written: Mutex<Vec<PathBuf>>,
}

impl DirectoryReportSink {
    /// Creates the sink, creating `root` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            counter: AtomicU64::new(0),
            written: Mutex::new(Vec::new()),
        })
    }

    /// Returns the directory receiving attachments.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the paths written so far, in order.
    #[must_use]
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().map_or_else(|_| Vec::new(), |paths| paths.clone())
    }
}

impl ReportSink for DirectoryReportSink {
    fn attach(&self, attachment: &Attachment) {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let file_name = format!(
            "{seq:03}-{}.{}",
            slugify(&attachment.name),
            attachment.content_type.extension()
        );
        let path = self.root.join(file_name);
        if fs::write(&path, attachment.body.as_bytes()).is_ok()
            && let Ok(mut written) = self.written.lock()
        {
            written.push(path);
        }
    }
}

/// Report sink keeping attachments in memory.
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    /// Captured attachments in arrival order.
    attachments: Mutex<Vec<Attachment>>,
}

impl MemoryReportSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of captured attachments.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.lock().map_or_else(|_| Vec::new(), |items| items.clone())
    }
}

impl ReportSink for MemoryReportSink {
    fn attach(&self, attachment: &Attachment) {
        if let Ok(mut items) = self.attachments.lock() {
            items.push(attachment.clone());
        }
    }
}

/// Report sink that discards attachments.
#[derive(Debug, Default)]
pub struct NoopReportSink;

impl ReportSink for NoopReportSink {
    fn attach(&self, _attachment: &Attachment) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Lower-cases a name and collapses non-alphanumeric runs into `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() { String::from("attachment") } else { slug }
}
