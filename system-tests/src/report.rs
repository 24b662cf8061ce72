// system-tests/src/report.rs
// ============================================================================
// Module: Test Reporter
// Description: Per-scenario run roots, step records, and summaries.
// Purpose: Leave a deterministic report behind every scenario, pass or fail.
// Dependencies: reqres-client, serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`TestReporter`] owns `<run root>/<test name>/`. Steps run through
//! [`TestReporter::step`] are timed and recorded; request/response traces
//! land under `attachments/` through [`TestReporter::attachments`]. The
//! summary is written as canonical JSON (`summary.json`) and Markdown
//! (`summary.md`), and is still written from `Drop` when a scenario panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use reqres_client::sink::DirectoryReportSink;
use serde::Serialize;

// ============================================================================
// SECTION: Scenario Metadata
// ============================================================================

/// Epic shared by every ReqRes scenario.
pub const EPIC: &str = "ReqRes API Testing";

/// How much a failing scenario matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks every other check.
    Blocker,
    /// Core behavior is broken.
    Critical,
    /// Regular regression.
    Normal,
    /// Cosmetic or edge behavior.
    Minor,
}

impl Severity {
    /// Returns the lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocker => "blocker",
            Self::Critical => "critical",
            Self::Normal => "normal",
            Self::Minor => "minor",
        }
    }
}

/// Report labels attached to a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioMeta {
    /// Top-level grouping.
    pub epic: &'static str,
    /// Feature under test.
    pub feature: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// What the scenario proves.
    pub description: &'static str,
    /// Failure impact.
    pub severity: Severity,
    /// Free-form tags.
    pub tags: &'static [&'static str],
}

impl ScenarioMeta {
    /// Creates metadata under [`EPIC`] with normal severity and no tags.
    #[must_use]
    pub const fn new(feature: &'static str, title: &'static str) -> Self {
        Self {
            epic: EPIC,
            feature,
            title,
            description: "",
            severity: Severity::Normal,
            tags: &[],
        }
    }

    /// Sets the description.
    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the severity.
    #[must_use]
    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub const fn tags(mut self, tags: &'static [&'static str]) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Final or per-step result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Completed without error.
    Passed,
    /// Returned an error.
    Failed,
    /// Unwound from a panic.
    Panicked,
    /// Dropped without an explicit result.
    Unknown,
}

impl Outcome {
    /// Returns the lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Panicked => "panicked",
            Self::Unknown => "unknown",
        }
    }
}

/// One timed scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Step title.
    pub title: String,
    /// Step result.
    pub outcome: Outcome,
    /// Wall-clock duration.
    pub duration_ms: u128,
    /// Error message for failed steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serialized summary layout.
#[derive(Debug, Serialize)]
struct TestSummary<'a> {
    /// Test function name.
    test_name: &'a str,
    /// Overall result.
    status: Outcome,
    /// Scenario labels, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a ScenarioMeta>,
    /// Start time in Unix milliseconds.
    started_at_ms: u128,
    /// End time in Unix milliseconds.
    ended_at_ms: u128,
    /// Total duration.
    duration_ms: u128,
    /// Steps in execution order.
    steps: &'a [StepRecord],
    /// Free-form notes.
    notes: &'a [String],
    /// Attachment paths relative to the test root.
    artifacts: Vec<String>,
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Report writer for a single scenario.
#[derive(Debug)]
pub struct TestReporter {
    /// Directory owned by this test.
    root: PathBuf,
    /// Test function name.
    test_name: String,
    /// Scenario labels.
    meta: Option<ScenarioMeta>,
    /// Start time in Unix milliseconds.
    started_at_ms: u128,
    /// Recorded steps.
    steps: Vec<StepRecord>,
    /// Free-form notes.
    notes: Vec<String>,
    /// Destination for request/response attachments.
    attachments: Arc<DirectoryReportSink>,
    /// Set once a summary has been written.
    finalized: bool,
}

impl TestReporter {
    /// Creates `<run_root>/<test_name>/`, defaulting the run root to
    /// `target/system-tests/run_<unix ms>`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directories cannot be created.
    pub fn new(test_name: &str, run_root: Option<&Path>) -> io::Result<Self> {
        let root = run_root.map_or_else(default_run_root, Path::to_path_buf).join(test_name);
        fs::create_dir_all(&root)?;
        let attachments = Arc::new(DirectoryReportSink::new(root.join("attachments"))?);
        Ok(Self {
            root,
            test_name: test_name.to_string(),
            meta: None,
            started_at_ms: now_millis(),
            steps: Vec::new(),
            notes: Vec::new(),
            attachments,
            finalized: false,
        })
    }

    /// Attaches scenario labels.
    #[must_use]
    pub fn with_meta(mut self, meta: ScenarioMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns the test directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the scenario labels.
    #[must_use]
    pub const fn meta(&self) -> Option<&ScenarioMeta> {
        self.meta.as_ref()
    }

    /// Returns the attachment sink for this test.
    #[must_use]
    pub fn attachments(&self) -> Arc<DirectoryReportSink> {
        Arc::clone(&self.attachments)
    }

    /// Returns the steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Returns the notes recorded so far.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Adds a note to the summary.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Runs `body` as a titled step and records its duration and result.
    ///
    /// # Errors
    ///
    /// Returns the step's own error unchanged.
    pub fn step<T, E: Display>(
        &mut self,
        title: &str,
        body: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let started = Instant::now();
        let result = body();
        let (outcome, error) = match &result {
            Ok(_) => (Outcome::Passed, None),
            Err(err) => (Outcome::Failed, Some(err.to_string())),
        };
        self.steps.push(StepRecord {
            title: title.to_string(),
            outcome,
            duration_ms: started.elapsed().as_millis(),
            error,
        });
        result
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a UTF-8 text artifact.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }

    /// Writes `summary.json` and `summary.md`.
    ///
    /// # Errors
    ///
    /// Returns an error when either file cannot be written.
    pub fn finish(&mut self, status: Outcome) -> io::Result<()> {
        let ended_at_ms = now_millis();
        let artifacts = self
            .attachments
            .written()
            .iter()
            .map(|path| {
                path.strip_prefix(&self.root)
                    .unwrap_or(path.as_path())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        let summary = TestSummary {
            test_name: &self.test_name,
            status,
            scenario: self.meta.as_ref(),
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            steps: &self.steps,
            notes: &self.notes,
            artifacts,
        };
        self.write_json("summary.json", &summary)?;
        self.write_text("summary.md", &summary_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }
}

impl TestReporter {
    /// Writes the summary for a finished scenario body.
    ///
    /// A failed scenario records its error as a note. When the summary write
    /// then fails as well, the write error becomes a note too and the
    /// scenario error stays the one the caller reports.
    ///
    /// # Errors
    ///
    /// Returns an error only when a passing scenario's summary cannot be
    /// written.
    pub fn conclude<E: Display>(&mut self, outcome: &Result<(), E>) -> io::Result<()> {
        let Err(err) = outcome else {
            return self.finish(Outcome::Passed);
        };
        self.note(format!("failure: {err}"));
        if let Err(write_err) = self.finish(Outcome::Failed) {
            self.note(format!("summary not written: {write_err}"));
            self.finalized = true;
        }
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { Outcome::Panicked } else { Outcome::Unknown };
        self.notes.push("test terminated without explicit summary".to_string());
        let _ = self.finish(status);
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current Unix time in milliseconds.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Returns the default run root for this process.
fn default_run_root() -> PathBuf {
    PathBuf::from("target/system-tests").join(format!("run_{}", now_millis()))
}

/// Renders the Markdown summary.
fn summary_markdown(summary: &TestSummary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Scenario Summary\n");
    if let Some(meta) = summary.scenario {
        let _ = writeln!(out, "## Scenario\n");
        let _ = writeln!(out, "- Epic: {}", meta.epic);
        let _ = writeln!(out, "- Feature: {}", meta.feature);
        let _ = writeln!(out, "- Title: {}", meta.title);
        let _ = writeln!(out, "- Severity: {}", meta.severity.as_str());
        if !meta.tags.is_empty() {
            let _ = writeln!(out, "- Tags: {}", meta.tags.join(", "));
        }
        if !meta.description.is_empty() {
            let _ = writeln!(out, "\n{}", meta.description);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "## Status\n");
    let _ = writeln!(out, "- Test: {}", summary.test_name);
    let _ = writeln!(out, "- Status: {}", summary.status.as_str());
    let _ = writeln!(out, "- Duration (ms): {}", summary.duration_ms);
    let _ = writeln!(out, "\n## Steps\n");
    if summary.steps.is_empty() {
        let _ = writeln!(out, "- None");
    }
    for (index, step) in summary.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] {} ({} ms)",
            index + 1,
            step.outcome.as_str(),
            step.title,
            step.duration_ms
        );
        if let Some(error) = &step.error {
            let _ = writeln!(out, "   - {error}");
        }
    }
    let sections = [("Notes", summary.notes), ("Artifacts", summary.artifacts.as_slice())];
    for (heading, items) in sections {
        let _ = writeln!(out, "\n## {heading}\n");
        if items.is_empty() {
            let _ = writeln!(out, "- None");
        }
        for item in items {
            let _ = writeln!(out, "- {item}");
        }
    }
    out
}
