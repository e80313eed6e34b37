// crates/netcheck-checks/src/napalm_lldp_neighbors.rs
// ============================================================================
// Module: NAPALM LLDP Neighbors Check
// Description: LLDP neighbor identity per local interface.
// Purpose: Assert which remote host and port sit behind each local port.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! The `lldp_neighbors_detail` getter lists neighbors per local interface.
//! The extractor keeps the first neighbor of every interface and adds:
//! - `remote_host`: the neighbor's system name,
//! - `remote_port_expanded`: the neighbor port with its abbreviation expanded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::AttemptOutcome;
use netcheck_core::CaseTemplate;
use netcheck_core::ExtractError;
use netcheck_core::HostName;
use netcheck_core::ResultExtractor;
use netcheck_core::TestClass;
use netcheck_core::TestModule;
use netcheck_core::runtime::extract::object_field;
use netcheck_core::runtime::extract::primary_success;
use serde_json::Map;
use serde_json::Value;

use crate::interface_names::expand_interface_name;
use crate::operations::NapalmGetter;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.napalm_lldp_neighbors";

/// Test class name.
pub const CLASS_NAME: &str = "TestNapalmLldpNeighbors";

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Indexes the first LLDP neighbor of each local interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LldpNeighborsExtractor;

impl ResultExtractor for LldpNeighborsExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        let interfaces = object_field(host, payload, "lldp_neighbors_detail")?;
        let mut indexed = Map::new();
        for (interface, neighbors) in interfaces {
            let Some(Value::Object(first)) = neighbors.as_array().and_then(|list| list.first())
            else {
                continue;
            };
            let mut neighbor = first.clone();
            let remote_host = first.get("remote_system_name").cloned().unwrap_or(Value::Null);
            let expanded = first
                .get("remote_port")
                .and_then(Value::as_str)
                .map_or(Value::Null, |port| Value::from(expand_interface_name(port)));
            neighbor.insert("remote_host".to_string(), remote_host);
            neighbor.insert("remote_port_expanded".to_string(), expanded);
            indexed.insert(interface.clone(), Value::Object(neighbor));
        }
        Ok(Value::Object(indexed))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    TestModule::new(MODULE_PATH).with_class(
        TestClass::new(CLASS_NAME, NapalmGetter::new("lldp_neighbors_detail"))
            .with_extractor(LldpNeighborsExtractor)
            .with_case(CaseTemplate::attribute(
                "remote_host",
                &["local_port"],
                "remote_host",
                "remote_host",
            ))
            .with_case(CaseTemplate::attribute(
                "remote_port",
                &["local_port"],
                "remote_port_expanded",
                "remote_port",
            )),
    )
}
