// crates/netcheck-checks/src/napalm_network_instances.rs
// ============================================================================
// Module: NAPALM Network Instances Check
// Description: VRF membership and route distinguishers.
// Purpose: Assert which interfaces belong to a network instance.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! The `network_instances` getter answers, per instance,
//! `{"name", "type", "state": {"route_distinguisher"}, "interfaces":
//! {"interface": {name: {}}}}`. The extractor reduces each instance to
//! `{"interfaces": [names], "route_distinguisher": ...}` so interface lists
//! compare as sets.

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

use crate::operations::NapalmGetter;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.napalm_network_instances";

/// Test class name.
pub const CLASS_NAME: &str = "TestNapalmNetworkInstances";

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Reduces network instances to interface names and route distinguisher.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkInstancesExtractor;

impl ResultExtractor for NetworkInstancesExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        let instances = object_field(host, payload, "network_instances")?;
        let mut reduced = Map::new();
        for (name, instance) in instances {
            let interfaces: Vec<Value> = instance
                .pointer("/interfaces/interface")
                .and_then(Value::as_object)
                .map(|interfaces| interfaces.keys().map(|key| Value::from(key.as_str())).collect())
                .unwrap_or_default();
            let route_distinguisher =
                instance.pointer("/state/route_distinguisher").cloned().unwrap_or(Value::Null);
            let mut entry = Map::new();
            entry.insert("interfaces".to_string(), Value::Array(interfaces));
            entry.insert("route_distinguisher".to_string(), route_distinguisher);
            reduced.insert(name.clone(), Value::Object(entry));
        }
        Ok(Value::Object(reduced))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    TestModule::new(MODULE_PATH).with_class(
        TestClass::new(CLASS_NAME, NapalmGetter::new("network_instances"))
            .with_extractor(NetworkInstancesExtractor)
            .with_case(CaseTemplate::exists("network_instance_exists", &["network_instance"]))
            .with_case(CaseTemplate::attribute(
                "network_instance_interfaces",
                &["network_instance"],
                "interfaces",
                "interfaces",
            ))
            .with_case(CaseTemplate::attribute(
                "route_distinguisher",
                &["network_instance"],
                "route_distinguisher",
                "route_distinguisher",
            )),
    )
}
