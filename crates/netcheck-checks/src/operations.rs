// crates/netcheck-checks/src/operations.rs
// ============================================================================
// Module: Built-in Operations
// Description: Operation builders shared by the built-in test modules.
// Purpose: Derive device tasks, arguments, and host filters from specs.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! Built-in classes query devices through two task families: NAPALM getters
//! and Netmiko show commands. Both restrict the inventory to the hosts named
//! in `test_data` and layer their fixed arguments over `test_execution`;
//! fixed arguments win on conflicting keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::Arguments;
use netcheck_core::HostFilter;
use netcheck_core::HostName;
use netcheck_core::OperationBuilder;
use netcheck_core::TaskId;
use netcheck_core::TestSpec;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Task identifier of the NAPALM getter task.
pub const NAPALM_GET_TASK: &str = "napalm_get";

/// Task identifier of the Netmiko command task.
pub const NETMIKO_SEND_COMMAND_TASK: &str = "netmiko_send_command";

/// Default `test_data` field naming the host under test.
pub const HOST_FIELD: &str = "host";

// ============================================================================
// SECTION: Host Filters
// ============================================================================

/// Builds a filter accepting the hosts named by `field` in the spec's records.
///
/// Records without a string value in `field` contribute no host.
#[must_use]
pub fn hosts_from_test_data(spec: &TestSpec, field: &str) -> HostFilter {
    HostFilter::names(
        spec.test_data
            .iter()
            .filter_map(|record| record.get(field).and_then(Value::as_str))
            .map(HostName::new),
    )
}

/// Copies `test_execution` and overlays fixed arguments.
fn merged_arguments(
    spec: &TestSpec,
    fixed: impl IntoIterator<Item = (&'static str, Value)>,
) -> Arguments {
    let mut arguments = spec.test_execution.clone();
    for (key, value) in fixed {
        arguments.insert(key.to_string(), value);
    }
    arguments
}

// ============================================================================
// SECTION: Operation Builders
// ============================================================================

/// NAPALM getter operation (`napalm_get` with one getter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NapalmGetter {
    /// Getter name, for example `users`.
    getter: &'static str,
}

impl NapalmGetter {
    /// Creates a getter operation.
    #[must_use]
    pub const fn new(getter: &'static str) -> Self {
        Self {
            getter,
        }
    }
}

impl OperationBuilder for NapalmGetter {
    fn task(&self, _spec: &TestSpec) -> TaskId {
        TaskId::new(NAPALM_GET_TASK)
    }

    fn arguments(&self, spec: &TestSpec) -> Arguments {
        merged_arguments(spec, [("getters", Value::from(vec![self.getter]))])
    }

    fn host_filter(&self, spec: &TestSpec) -> Option<HostFilter> {
        Some(hosts_from_test_data(spec, HOST_FIELD))
    }
}

/// Netmiko show-command operation with TextFSM parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetmikoCommand {
    /// Command sent to the device.
    command: &'static str,
}

impl NetmikoCommand {
    /// Creates a command operation.
    #[must_use]
    pub const fn new(command: &'static str) -> Self {
        Self {
            command,
        }
    }
}

impl OperationBuilder for NetmikoCommand {
    fn task(&self, _spec: &TestSpec) -> TaskId {
        TaskId::new(NETMIKO_SEND_COMMAND_TASK)
    }

    fn arguments(&self, spec: &TestSpec) -> Arguments {
        merged_arguments(
            spec,
            [("command_string", Value::from(self.command)), ("use_textfsm", Value::Bool(true))],
        )
    }

    fn host_filter(&self, spec: &TestSpec) -> Option<HostFilter> {
        Some(hosts_from_test_data(spec, HOST_FIELD))
    }
}
