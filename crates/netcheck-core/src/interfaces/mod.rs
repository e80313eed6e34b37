// crates/netcheck-core/src/interfaces/mod.rs
// ============================================================================
// Module: Netcheck Interfaces
// Description: Backend, operation, and extractor contracts.
// Purpose: Define the seams between the core pipeline and its collaborators.
// Dependencies: crate::core, crate::runtime, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces describe how the core talks to the outside world without
//! embedding device or runner specifics:
//! - [`Backend`] executes an operation against named hosts.
//! - [`OperationBuilder`] derives the operation from a resolved spec.
//! - [`ResultExtractor`] reshapes a backend answer for assertions.
//!
//! Host-level failures are data inside [`AggregatedResult`]; only setup-level
//! problems surface as [`BackendError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::AggregatedResult;
use crate::core::AttemptOutcome;
use crate::core::HostName;
use crate::core::TaskId;
use crate::core::TransformedResult;
use crate::runtime::TestSpec;
use crate::runtime::extract::map_host_results;
use crate::runtime::extract::primary_success;

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Named arguments passed to a backend task.
pub type Arguments = Map<String, Value>;

/// Host predicate signature used by [`HostFilter::Predicate`].
type HostPredicate = dyn Fn(&HostName) -> bool + Send + Sync;

/// Restriction of the inventory an operation targets.
#[derive(Clone)]
pub enum HostFilter {
    /// Only the listed hosts.
    Names(BTreeSet<HostName>),
    /// Hosts accepted by an arbitrary predicate.
    Predicate(Arc<HostPredicate>),
}

impl HostFilter {
    /// Builds a filter that accepts the given host names.
    pub fn names<I, H>(hosts: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HostName>,
    {
        Self::Names(hosts.into_iter().map(Into::into).collect())
    }

    /// Builds a filter from a predicate.
    pub fn predicate(predicate: impl Fn(&HostName) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    /// Returns true when the host is targeted.
    #[must_use]
    pub fn matches(&self, host: &HostName) -> bool {
        match self {
            Self::Names(names) => names.contains(host),
            Self::Predicate(predicate) => predicate(host),
        }
    }
}

impl fmt::Debug for HostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names(names) => f.debug_tuple("Names").field(names).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Remote operation derived from a spec.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Task identifier understood by the backend.
    pub task: TaskId,
    /// Task arguments.
    pub arguments: Arguments,
    /// Optional inventory restriction; `None` targets the full inventory.
    pub host_filter: Option<HostFilter>,
}

/// Derives the remote operation of a test class.
pub trait OperationBuilder: Send + Sync {
    /// Returns the task identifier.
    fn task(&self, spec: &TestSpec) -> TaskId;

    /// Returns the task arguments; defaults to the spec's execution parameters.
    fn arguments(&self, spec: &TestSpec) -> Arguments {
        spec.test_execution.clone()
    }

    /// Returns the host filter; defaults to the full inventory.
    fn host_filter(&self, _spec: &TestSpec) -> Option<HostFilter> {
        None
    }
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// Backend errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Host-level failures are never reported through this type.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend is not usable (missing inventory, configuration, ...).
    #[error("backend setup error: {0}")]
    Setup(String),
    /// The backend could not run the task at all.
    #[error("backend error: {0}")]
    Execution(String),
}

/// Task-execution backend.
pub trait Backend: Send + Sync {
    /// Runs a task against the (optionally filtered) inventory.
    ///
    /// Every targeted host must appear in the result, failed or not.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] only for setup-level problems.
    fn run(
        &self,
        task: &TaskId,
        arguments: &Arguments,
        host_filter: Option<&HostFilter>,
    ) -> Result<AggregatedResult, BackendError>;
}

// ============================================================================
// SECTION: Result Extractor
// ============================================================================

/// Extraction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Re-keyed extraction was attempted on a failed host.
    #[error("host {host} failed; re-keyed extraction requires a successful result")]
    HostFailed {
        /// Host whose primary outcome is a failure.
        host: String,
    },
    /// Host has no attempt outcome at all.
    #[error("host {host} has no attempt outcomes")]
    NoOutcome {
        /// Host without outcomes.
        host: String,
    },
    /// Payload does not have the shape the extractor expects.
    #[error("unexpected payload for host {host}: {reason}")]
    Shape {
        /// Host with the malformed payload.
        host: String,
        /// Description of the mismatch.
        reason: String,
    },
    /// A list entry lacks the field used for re-keying.
    #[error("entry {position} of host {host} lacks key field {key}")]
    MissingKey {
        /// Host with the incomplete entry.
        host: String,
        /// Re-keying field.
        key: String,
        /// Zero-based position of the entry in the list.
        position: usize,
    },
}

/// Per-test-type transformer from raw backend answers to assertion lookups.
///
/// The default [`ResultExtractor::transform`] passes failed hosts through and
/// applies [`ResultExtractor::single_transform`] to every successful host. A
/// host whose transform fails is recorded as an `extract` failure.
pub trait ResultExtractor: Send + Sync {
    /// Transforms one host's outcomes; requires a successful primary outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::HostFailed`] when the primary outcome failed, or
    /// a shape error when the payload is malformed.
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        primary_success(host, outcomes).cloned()
    }

    /// Transforms the aggregated result.
    ///
    /// # Errors
    ///
    /// The default never fails. Strict overrides built on
    /// [`rekey_by_host`](crate::runtime::extract::rekey_by_host) return the
    /// first [`ExtractError`].
    fn transform(&self, aggregated: &AggregatedResult) -> Result<TransformedResult, ExtractError> {
        map_host_results(self, aggregated)
    }
}
