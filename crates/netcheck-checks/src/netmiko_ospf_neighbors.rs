// crates/netcheck-checks/src/netmiko_ospf_neighbors.rs
// ============================================================================
// Module: Netmiko OSPF Neighbors Check
// Description: OSPF adjacencies keyed by neighbor router id, and their count.
// Purpose: Assert adjacency state, address, and interface per neighbor.
// Dependencies: netcheck-core
// ============================================================================

//! ## Overview
//! `show ip ospf neighbor` parsed by TextFSM yields one record per adjacency
//! with `neighbor_id`, `state`, `address`, and `interface`. Both classes
//! re-key the list by `neighbor_id`; the count class counts the entries.

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
pub const MODULE_PATH: &str = "netcheck.checks.netmiko_ospf_neighbors";

/// Neighbor attribute class.
pub const CLASS_NAME: &str = "TestNetmikoOspfNeighbors";

/// Neighbor count class.
pub const COUNT_CLASS_NAME: &str = "TestNetmikoOspfNeighborsCount";

/// Command issued to the device.
const COMMAND: &str = "show ip ospf neighbor";

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module with the attribute and count classes.
#[must_use]
pub fn module() -> TestModule {
    let mut neighbors = TestClass::new(CLASS_NAME, NetmikoCommand::new(COMMAND))
        .with_extractor(RekeyByField::new("neighbor_id"))
        .with_case(CaseTemplate::exists("neighbor_id", &["neighbor_id"]));
    for attribute in ["state", "address", "interface"] {
        neighbors = neighbors.with_case(CaseTemplate::attribute(
            attribute,
            &["neighbor_id"],
            attribute,
            attribute,
        ));
    }
    let count = TestClass::new(COUNT_CLASS_NAME, NetmikoCommand::new(COMMAND))
        .with_extractor(RekeyByField::new("neighbor_id"))
        .with_case(CaseTemplate::count("neighbor_count", &[], "neighbor_count"));
    TestModule::new(MODULE_PATH).with_class(neighbors).with_class(count)
}
