// crates/netcheck-core/src/core/results.rs
// ============================================================================
// Module: Netcheck Results
// Description: Per-host attempt outcomes, aggregated and transformed results.
// Purpose: Represent host-level success and failure as data, never as control flow.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A backend answers an operation with an [`AggregatedResult`]: for every
//! targeted host, an ordered list of [`AttemptOutcome`] values. The first
//! outcome is the host's primary outcome; a host whose primary outcome is a
//! failure is "failed" but stays in the mapping.
//!
//! Extractors turn the aggregated result into a [`TransformedResult`], which
//! assertions query by host and key path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::HostName;
use crate::core::identifiers::TaskId;

// ============================================================================
// SECTION: Attempt Outcomes
// ============================================================================

/// Error detail carried by a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Short error classification (for example `timeout`).
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

impl FailureDetail {
    /// Creates a new failure detail.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of one attempt of an operation on one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The attempt produced a value.
    Success(Value),
    /// The attempt failed with an error detail.
    Failure(FailureDetail),
}

impl AttemptOutcome {
    /// Creates a failed outcome.
    #[must_use]
    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure(FailureDetail::new(kind, message))
    }

    /// Returns true when the attempt failed.
    #[must_use]
    pub const fn failed(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure detail, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FailureDetail> {
        match self {
            Self::Success(_) => None,
            Self::Failure(detail) => Some(detail),
        }
    }

    /// Walks a key path through a successful value.
    ///
    /// Object members are addressed by key, array elements by decimal index.
    /// Returns `None` for failed outcomes or missing path segments.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let mut current = self.value()?;
        for segment in path {
            let segment = segment.as_ref();
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

// ============================================================================
// SECTION: Aggregated Result
// ============================================================================

/// Raw per-host answer of a backend for one operation.
///
/// # Invariants
/// - Every targeted host has an entry, including failed hosts.
/// - Attempt order is preserved as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Task identifier the result belongs to.
    pub task: TaskId,
    /// Ordered attempt outcomes keyed by host.
    pub hosts: BTreeMap<HostName, Vec<AttemptOutcome>>,
}

impl AggregatedResult {
    /// Creates an empty aggregated result for a task.
    #[must_use]
    pub const fn new(task: TaskId) -> Self {
        Self {
            task,
            hosts: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the outcomes for a host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<HostName>, outcomes: Vec<AttemptOutcome>) -> Self {
        self.insert(host, outcomes);
        self
    }

    /// Inserts (or replaces) the outcomes for a host.
    pub fn insert(&mut self, host: impl Into<HostName>, outcomes: Vec<AttemptOutcome>) {
        self.hosts.insert(host.into(), outcomes);
    }

    /// Returns the outcomes recorded for a host.
    #[must_use]
    pub fn outcomes(&self, host: &str) -> Option<&[AttemptOutcome]> {
        self.hosts.get(host).map(Vec::as_slice)
    }

    /// Returns the primary (first) outcome of a host.
    #[must_use]
    pub fn primary(&self, host: &str) -> Option<&AttemptOutcome> {
        self.hosts.get(host).and_then(|outcomes| outcomes.first())
    }

    /// Returns hosts whose primary outcome is a failure.
    pub fn failed_hosts(&self) -> impl Iterator<Item = &HostName> {
        self.hosts
            .iter()
            .filter(|(_, outcomes)| outcomes.first().is_some_and(AttemptOutcome::failed))
            .map(|(host, _)| host)
    }

    /// Returns the number of hosts in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true when no host is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

// ============================================================================
// SECTION: Transformed Result
// ============================================================================

/// Extractor output queried by assertions.
///
/// # Invariants
/// - `Aggregated` is the identity shape: the raw result passed through unchanged.
/// - In `ByHost`, failed hosts keep their `Failure` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "hosts", rename_all = "snake_case")]
pub enum TransformedResult {
    /// Raw aggregated result (identity extraction).
    Aggregated(AggregatedResult),
    /// One outcome per host, carrying the extractor-shaped payload on success.
    ByHost(BTreeMap<HostName, AttemptOutcome>),
}

impl TransformedResult {
    /// Returns the outcome assertions should read for a host.
    ///
    /// For the identity shape this is the host's primary outcome.
    #[must_use]
    pub fn host(&self, host: &str) -> Option<&AttemptOutcome> {
        match self {
            Self::Aggregated(result) => result.primary(host),
            Self::ByHost(hosts) => hosts.get(host),
        }
    }

    /// Returns true when the host is present.
    #[must_use]
    pub fn contains_host(&self, host: &str) -> bool {
        match self {
            Self::Aggregated(result) => result.hosts.contains_key(host),
            Self::ByHost(hosts) => hosts.contains_key(host),
        }
    }

    /// Returns the host names in ascending order.
    #[must_use]
    pub fn host_names(&self) -> Vec<&HostName> {
        match self {
            Self::Aggregated(result) => result.hosts.keys().collect(),
            Self::ByHost(hosts) => hosts.keys().collect(),
        }
    }

    /// Walks a key path under a host's successful payload.
    #[must_use]
    pub fn lookup<S: AsRef<str>>(&self, host: &str, path: &[S]) -> Option<&Value> {
        self.host(host)?.lookup(path)
    }

    /// Returns the number of hosts.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Aggregated(result) => result.len(),
            Self::ByHost(hosts) => hosts.len(),
        }
    }

    /// Returns true when no host is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
