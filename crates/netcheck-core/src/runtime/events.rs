// crates/netcheck-core/src/runtime/events.rs
// ============================================================================
// Module: Netcheck Run Events
// Description: Structured events for bundle resolution, execution, and evaluation.
// Purpose: Emit JSON-line run logs without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Run events are plain serializable payloads stamped with a millisecond
//! timestamp. A [`RunEventSink`] decides where they go; the stderr and file
//! sinks write one JSON object per line, and failures to write are ignored
//! so logging never changes a run's outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;

use crate::core::Operator;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A bundle record resolved into a spec.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BundleLoadedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Spec display name.
    pub spec: String,
    /// Resolved module location.
    pub module: String,
    /// Number of `test_data` records.
    pub test_data: usize,
}

/// A bundle record failed to resolve.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolutionFailedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Zero-based record position in the bundle.
    pub position: usize,
    /// Requested test class.
    pub class: String,
    /// Rendered resolution error.
    pub error: String,
}

/// The backend answered an operation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BackendInvokedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Spec display name.
    pub spec: String,
    /// Task identifier.
    pub task: String,
    /// Hosts present in the answer.
    pub hosts: usize,
    /// Hosts whose primary outcome failed.
    pub failed_hosts: usize,
}

/// A test case was evaluated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaseEvaluatedEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Case name.
    pub case: String,
    /// Verdict label.
    pub verdict: &'static str,
    /// Comparison operator.
    pub operator: Operator,
    /// Expected value.
    pub expected: Value,
    /// Actual value.
    pub actual: Value,
}

/// Any run event.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RunEvent {
    /// Record resolved.
    BundleLoaded(BundleLoadedEvent),
    /// Record failed to resolve.
    ResolutionFailed(ResolutionFailedEvent),
    /// Backend answered.
    BackendInvoked(BackendInvokedEvent),
    /// Case evaluated.
    CaseEvaluated(CaseEvaluatedEvent),
}

impl RunEvent {
    /// Creates a `bundle_loaded` event.
    #[must_use]
    pub fn bundle_loaded(spec: String, module: String, test_data: usize) -> Self {
        Self::BundleLoaded(BundleLoadedEvent {
            event: "bundle_loaded",
            timestamp_ms: now_ms(),
            spec,
            module,
            test_data,
        })
    }

    /// Creates a `resolution_failed` event.
    #[must_use]
    pub fn resolution_failed(position: usize, class: String, error: String) -> Self {
        Self::ResolutionFailed(ResolutionFailedEvent {
            event: "resolution_failed",
            timestamp_ms: now_ms(),
            position,
            class,
            error,
        })
    }

    /// Creates a `backend_invoked` event.
    #[must_use]
    pub fn backend_invoked(spec: String, task: String, hosts: usize, failed_hosts: usize) -> Self {
        Self::BackendInvoked(BackendInvokedEvent {
            event: "backend_invoked",
            timestamp_ms: now_ms(),
            spec,
            task,
            hosts,
            failed_hosts,
        })
    }

    /// Creates a `case_evaluated` event.
    #[must_use]
    pub fn case_evaluated(
        case: String,
        verdict: &'static str,
        operator: Operator,
        expected: Value,
        actual: Value,
    ) -> Self {
        Self::CaseEvaluated(CaseEvaluatedEvent {
            event: "case_evaluated",
            timestamp_ms: now_ms(),
            case,
            verdict,
            operator,
            expected,
            actual,
        })
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BundleLoaded(event) => event.event,
            Self::ResolutionFailed(event) => event.event,
            Self::BackendInvoked(event) => event.event,
            Self::CaseEvaluated(event) => event.event,
        }
    }
}

/// Milliseconds since the Unix epoch; zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for run events.
pub trait RunEventSink: Send + Sync {
    /// Record a run event.
    fn record(&self, event: &RunEvent);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl RunEventSink for StderrEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RunEventSink for FileEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op sink.
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn record(&self, _event: &RunEvent) {}
}

/// Sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryEventSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<RunEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the identifiers of the recorded events.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(RunEvent::name).collect()
    }
}

impl RunEventSink for MemoryEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only panic-based assertions are permitted.")]

    use std::io::Read;

    use super::FileEventSink;
    use super::RunEvent;
    use super::RunEventSink;

    #[test]
    fn file_sink_appends_json_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = FileEventSink::new(file.path()).unwrap();
        sink.record(&RunEvent::backend_invoked("TestUsers".into(), "napalm_get".into(), 3, 1));
        sink.record(&RunEvent::resolution_failed(2, "TestMissing".into(), "boom".into()));

        let mut contents = String::new();
        std::fs::File::open(file.path()).unwrap().read_to_string(&mut contents).unwrap();
        let lines: Vec<serde_json::Value> =
            contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "backend_invoked");
        assert_eq!(lines[0]["failed_hosts"], 1);
        assert_eq!(lines[1]["event"], "resolution_failed");
        assert_eq!(lines[1]["class"], "TestMissing");
    }
}
