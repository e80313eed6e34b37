// crates/netcheck-core/src/runtime/extract.rs
// ============================================================================
// Module: Netcheck Result Extraction
// Description: Extraction modes and reusable extractors.
// Purpose: Reshape per-host outcomes into structures assertions can index.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Two extraction modes are first-class:
//! - **Passthrough-by-host** ([`passthrough_by_host`]): each host maps to its
//!   primary outcome, failures included.
//! - **Re-keyed** ([`rekey_by_host`]): each host maps to the output of a
//!   per-host transform; any failed host is a precondition error.
//!
//! [`map_host_results`] combines them and backs the default
//! [`ResultExtractor::transform`]: failed hosts pass through, successful hosts
//! are re-keyed. A host whose payload cannot be extracted becomes a failure
//! of kind `extract`; the other hosts are unaffected.
//!
//! Re-keying a list under a field keeps the last entry on duplicate keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::core::AggregatedResult;
use crate::core::AttemptOutcome;
use crate::core::FailureDetail;
use crate::core::HostName;
use crate::core::TransformedResult;
use crate::interfaces::ExtractError;
use crate::interfaces::ResultExtractor;

// ============================================================================
// SECTION: Extraction Modes
// ============================================================================

/// Returns the successful primary value of a host.
///
/// # Errors
///
/// Returns [`ExtractError::NoOutcome`] for hosts without outcomes and
/// [`ExtractError::HostFailed`] when the primary outcome failed.
pub fn primary_success<'a>(
    host: &HostName,
    outcomes: &'a [AttemptOutcome],
) -> Result<&'a Value, ExtractError> {
    match outcomes.first() {
        Some(AttemptOutcome::Success(value)) => Ok(value),
        Some(AttemptOutcome::Failure(_)) => Err(ExtractError::HostFailed {
            host: host.to_string(),
        }),
        None => Err(ExtractError::NoOutcome {
            host: host.to_string(),
        }),
    }
}

/// Failure kind recorded for hosts whose outcomes could not be extracted.
pub const EXTRACT_FAILURE_KIND: &str = "extract";

/// Records an extraction error as that host's failed outcome.
fn extract_failure(err: &ExtractError) -> AttemptOutcome {
    AttemptOutcome::Failure(FailureDetail::new(EXTRACT_FAILURE_KIND, err.to_string()))
}

/// Maps every host to its primary outcome, preserving failures.
///
/// A host with an empty outcome list maps to an `extract` failure.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ResultExtractor::transform`].
pub fn passthrough_by_host(
    aggregated: &AggregatedResult,
) -> Result<TransformedResult, ExtractError> {
    let mut hosts = BTreeMap::new();
    for (host, outcomes) in &aggregated.hosts {
        let entry = outcomes.first().cloned().unwrap_or_else(|| {
            extract_failure(&ExtractError::NoOutcome {
                host: host.to_string(),
            })
        });
        hosts.insert(host.clone(), entry);
    }
    Ok(TransformedResult::ByHost(hosts))
}

/// Maps every host through the extractor's per-host transform.
///
/// # Errors
///
/// Returns [`ExtractError::HostFailed`] if any host failed, or the first error
/// raised by the per-host transform.
pub fn rekey_by_host<E: ResultExtractor + ?Sized>(
    extractor: &E,
    aggregated: &AggregatedResult,
) -> Result<TransformedResult, ExtractError> {
    let mut hosts = BTreeMap::new();
    for (host, outcomes) in &aggregated.hosts {
        let value = extractor.single_transform(host, outcomes)?;
        hosts.insert(host.clone(), AttemptOutcome::Success(value));
    }
    Ok(TransformedResult::ByHost(hosts))
}

/// Passes failed hosts through and re-keys successful ones.
///
/// Hosts without outcomes or with a malformed payload map to an `extract`
/// failure carrying the [`ExtractError`] message.
///
/// # Errors
///
/// Never fails; the `Result` matches [`ResultExtractor::transform`].
pub fn map_host_results<E: ResultExtractor + ?Sized>(
    extractor: &E,
    aggregated: &AggregatedResult,
) -> Result<TransformedResult, ExtractError> {
    let mut hosts = BTreeMap::new();
    for (host, outcomes) in &aggregated.hosts {
        let entry = match outcomes.first() {
            Some(failure @ AttemptOutcome::Failure(_)) => failure.clone(),
            Some(AttemptOutcome::Success(_)) => extractor
                .single_transform(host, outcomes)
                .map_or_else(|err| extract_failure(&err), AttemptOutcome::Success),
            None => extract_failure(&ExtractError::NoOutcome {
                host: host.to_string(),
            }),
        };
        hosts.insert(host.clone(), entry);
    }
    Ok(TransformedResult::ByHost(hosts))
}

// ============================================================================
// SECTION: Payload Helpers
// ============================================================================

/// Re-indexes a list of records under one of their fields.
///
/// String keys are used verbatim; other scalar keys use their JSON rendering.
/// Duplicate keys overwrite: the last entry wins.
///
/// # Errors
///
/// Returns [`ExtractError::Shape`] when `items` is not a list of objects and
/// [`ExtractError::MissingKey`] when an entry lacks the key field.
pub fn rekey_list(host: &HostName, items: &Value, key: &str) -> Result<Value, ExtractError> {
    let Value::Array(items) = items else {
        return Err(ExtractError::Shape {
            host: host.to_string(),
            reason: "expected a list of records".to_string(),
        });
    };
    let mut indexed = Map::new();
    for (position, item) in items.iter().enumerate() {
        let Value::Object(record) = item else {
            return Err(ExtractError::Shape {
                host: host.to_string(),
                reason: format!("entry {position} is not a record"),
            });
        };
        let name = match record.get(key) {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => {
                return Err(ExtractError::MissingKey {
                    host: host.to_string(),
                    key: key.to_string(),
                    position,
                });
            }
            Some(other) => other.to_string(),
        };
        indexed.insert(name, item.clone());
    }
    Ok(Value::Object(indexed))
}

/// Returns the object stored under `field` of a payload.
///
/// # Errors
///
/// Returns [`ExtractError::Shape`] when the field is missing or not an object.
pub fn object_field<'a>(
    host: &HostName,
    payload: &'a Value,
    field: &str,
) -> Result<&'a Map<String, Value>, ExtractError> {
    payload.get(field).and_then(Value::as_object).ok_or_else(|| ExtractError::Shape {
        host: host.to_string(),
        reason: format!("missing object field {field}"),
    })
}

// ============================================================================
// SECTION: Reusable Extractors
// ============================================================================

/// Identity extractor: the aggregated result is passed through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExtractor;

impl ResultExtractor for IdentityExtractor {
    fn transform(&self, aggregated: &AggregatedResult) -> Result<TransformedResult, ExtractError> {
        Ok(TransformedResult::Aggregated(aggregated.clone()))
    }
}

/// Passthrough-by-host extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExtractor;

impl ResultExtractor for PassthroughExtractor {
    fn transform(&self, aggregated: &AggregatedResult) -> Result<TransformedResult, ExtractError> {
        passthrough_by_host(aggregated)
    }
}

/// Extractor that re-keys a list-shaped payload under a record field.
///
/// # Invariants
/// - `list_field` of `None` means the payload itself is the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RekeyByField {
    /// Payload field holding the list, if nested.
    list_field: Option<String>,
    /// Record field used as the new key.
    key: String,
}

impl RekeyByField {
    /// Re-keys a payload that is itself a list.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            list_field: None,
            key: key.into(),
        }
    }

    /// Re-keys the list found under `list_field` of the payload.
    #[must_use]
    pub fn nested(list_field: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            list_field: Some(list_field.into()),
            key: key.into(),
        }
    }
}

impl ResultExtractor for RekeyByField {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        let items = match &self.list_field {
            Some(field) => payload.get(field).ok_or_else(|| ExtractError::Shape {
                host: host.to_string(),
                reason: format!("missing list field {field}"),
            })?,
            None => payload,
        };
        rekey_list(host, items, &self.key)
    }
}

/// Per-host transform signature wrapped by [`FnExtractor`].
type SingleTransformFn =
    dyn Fn(&HostName, &[AttemptOutcome]) -> Result<Value, ExtractError> + Send + Sync;

/// Extractor built from a per-host closure.
pub struct FnExtractor {
    /// Per-host transform.
    transform: Box<SingleTransformFn>,
}

impl FnExtractor {
    /// Wraps a per-host transform.
    pub fn new(
        transform: impl Fn(&HostName, &[AttemptOutcome]) -> Result<Value, ExtractError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            transform: Box::new(transform),
        }
    }
}

impl ResultExtractor for FnExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        (self.transform)(host, outcomes)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
