// crates/netcheck-checks/src/netmiko_cdp_neighbors.rs
// ============================================================================
// Module: Netmiko CDP Neighbors Check
// Description: CDP neighbor details keyed by neighbor host.
// Purpose: Assert local port, remote port, and management address per neighbor.
// Dependencies: netcheck-core
// ============================================================================

//! ## Overview
//! `show cdp neighbors detail` parsed by TextFSM yields a list of neighbor
//! records. They are re-keyed by `destination_host`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CaseTemplate;
use netcheck_core::RekeyByField;
use netcheck_core::TestClass;
use netcheck_core::TestModule;

use crate::operations::NetmikoCommand;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.netmiko_cdp_neighbors";

/// Test class name.
pub const CLASS_NAME: &str = "TestNetmikoCdpNeighbors";

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    TestModule::new(MODULE_PATH).with_class(
        TestClass::new(CLASS_NAME, NetmikoCommand::new("show cdp neighbors detail"))
            .with_extractor(RekeyByField::new("destination_host"))
            .with_case(CaseTemplate::exists("remote_host", &["remote_host"]))
            .with_case(CaseTemplate::attribute(
                "local_port",
                &["remote_host"],
                "local_port",
                "local_port",
            ))
            .with_case(CaseTemplate::attribute(
                "remote_port",
                &["remote_host"],
                "remote_port",
                "remote_port",
            ))
            .with_case(CaseTemplate::attribute(
                "management_ip",
                &["remote_host"],
                "management_ip",
                "management_ip",
            )),
    )
}
