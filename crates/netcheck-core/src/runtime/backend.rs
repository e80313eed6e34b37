// crates/netcheck-core/src/runtime/backend.rs
// ============================================================================
// Module: Netcheck In-Memory Backend
// Description: Deterministic backend answering from canned per-host outcomes.
// Purpose: Drive runs offline from fixtures and observe backend usage in tests.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! [`InMemoryBackend`] answers every task from a table of canned outcomes
//! keyed by task and host. Targeted hosts come from the inventory after the
//! host filter is applied; a targeted host without a canned answer gets a
//! `no_result` failure so that every targeted host appears in the result.
//! Every invocation is recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::core::AggregatedResult;
use crate::core::AttemptOutcome;
use crate::core::HostName;
use crate::core::TaskId;
use crate::interfaces::Arguments;
use crate::interfaces::Backend;
use crate::interfaces::BackendError;
use crate::interfaces::HostFilter;

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// Failure kind for targeted hosts without a canned answer.
pub const NO_RESULT_KIND: &str = "no_result";

/// Serializable description of an in-memory backend.
///
/// # Invariants
/// - Hosts named under `tasks` but missing from `inventory` are still targetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendFixture {
    /// Inventory host names.
    #[serde(default)]
    pub inventory: Vec<HostName>,
    /// Canned outcomes keyed by task, then host.
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, BTreeMap<HostName, Vec<AttemptOutcome>>>,
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Task identifier.
    pub task: TaskId,
    /// Arguments as received.
    pub arguments: Arguments,
    /// Hosts targeted after filtering.
    pub hosts: Vec<HostName>,
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// Backend answering from canned outcomes.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    /// Inventory host names, kept sorted and unique.
    inventory: Vec<HostName>,
    /// Canned outcomes keyed by task, then host.
    responses: BTreeMap<TaskId, BTreeMap<HostName, Vec<AttemptOutcome>>>,
    /// Recorded calls.
    calls: Mutex<Vec<Invocation>>,
}

impl InMemoryBackend {
    /// Creates a backend over an inventory with no canned answers.
    #[must_use]
    pub fn new<I, H>(inventory: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HostName>,
    {
        let mut inventory: Vec<HostName> = inventory.into_iter().map(Into::into).collect();
        inventory.sort();
        inventory.dedup();
        Self {
            inventory,
            responses: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a backend from a fixture.
    #[must_use]
    pub fn from_fixture(fixture: BackendFixture) -> Self {
        let mut backend = Self::new(fixture.inventory);
        for (task, hosts) in fixture.tasks {
            for (host, outcomes) in hosts {
                backend.add_response(task.clone(), host, outcomes);
            }
        }
        backend
    }

    /// Sets the outcomes of a host for a task; the host joins the inventory.
    pub fn add_response(
        &mut self,
        task: impl Into<TaskId>,
        host: impl Into<HostName>,
        outcomes: Vec<AttemptOutcome>,
    ) {
        let host = host.into();
        if let Err(position) = self.inventory.binary_search(&host) {
            self.inventory.insert(position, host.clone());
        }
        self.responses.entry(task.into()).or_default().insert(host, outcomes);
    }

    /// Builder form of [`Self::add_response`].
    #[must_use]
    pub fn with_response(
        mut self,
        task: impl Into<TaskId>,
        host: impl Into<HostName>,
        outcomes: Vec<AttemptOutcome>,
    ) -> Self {
        self.add_response(task, host, outcomes);
        self
    }

    /// Returns the inventory.
    #[must_use]
    pub fn inventory(&self) -> &[HostName] {
        &self.inventory
    }

    /// Returns the number of recorded calls.
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Returns a snapshot of the recorded calls.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl Backend for InMemoryBackend {
    fn run(
        &self,
        task: &TaskId,
        arguments: &Arguments,
        host_filter: Option<&HostFilter>,
    ) -> Result<AggregatedResult, BackendError> {
        let targeted: Vec<HostName> = self
            .inventory
            .iter()
            .filter(|host| host_filter.is_none_or(|filter| filter.matches(host)))
            .cloned()
            .collect();
        let canned = self.responses.get(task.as_str());
        let mut result = AggregatedResult::new(task.clone());
        for host in &targeted {
            let outcomes = canned
                .and_then(|hosts| hosts.get(host.as_str()))
                .filter(|outcomes| !outcomes.is_empty())
                .cloned()
                .unwrap_or_else(|| {
                    vec![AttemptOutcome::failure(
                        NO_RESULT_KIND,
                        format!("no canned result for task {task} on host {host}"),
                    )]
                });
            result.insert(host.clone(), outcomes);
        }
        self.calls
            .lock()
            .map_err(|_| BackendError::Execution("invocation log mutex poisoned".to_string()))?
            .push(Invocation {
                task: task.clone(),
                arguments: arguments.clone(),
                hosts: targeted,
            });
        Ok(result)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only panic-based assertions are permitted.")]

    use serde_json::json;

    use super::BackendFixture;
    use super::InMemoryBackend;
    use super::NO_RESULT_KIND;
    use crate::core::AttemptOutcome;
    use crate::core::TaskId;
    use crate::interfaces::Arguments;
    use crate::interfaces::Backend;
    use crate::interfaces::HostFilter;

    #[test]
    fn unanswered_hosts_fail_with_no_result() {
        let backend = InMemoryBackend::new(["R1", "R2"]).with_response(
            "napalm_get",
            "R1",
            vec![AttemptOutcome::Success(json!({}))],
        );
        let result = backend.run(&TaskId::new("napalm_get"), &Arguments::new(), None).unwrap();
        assert_eq!(result.len(), 2);
        let failure = result.primary("R2").and_then(AttemptOutcome::error).unwrap();
        assert_eq!(failure.kind, NO_RESULT_KIND);
    }

    #[test]
    fn host_filter_restricts_targets() {
        let backend = InMemoryBackend::new(["R1", "R2", "R3"]);
        let filter = HostFilter::names(["R2"]);
        let result =
            backend.run(&TaskId::new("napalm_get"), &Arguments::new(), Some(&filter)).unwrap();
        assert_eq!(result.hosts.keys().map(|host| host.as_str()).collect::<Vec<_>>(), vec!["R2"]);
        assert_eq!(backend.invocations()[0].hosts.len(), 1);
    }

    #[test]
    fn fixture_hosts_join_inventory() {
        let fixture: BackendFixture = serde_json::from_value(json!({
            "inventory": ["R1"],
            "tasks": {"napalm_get": {"R2": [{"success": {"users": {}}}]}}
        }))
        .unwrap();
        let backend = InMemoryBackend::from_fixture(fixture);
        assert_eq!(backend.inventory().len(), 2);
    }
}
