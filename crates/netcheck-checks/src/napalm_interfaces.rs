// crates/netcheck-checks/src/napalm_interfaces.rs
// ============================================================================
// Module: NAPALM Interfaces Check
// Description: Interface state and properties.
// Purpose: Assert link state, MTU, speed, and MAC address per interface.
// Dependencies: netcheck-core
// ============================================================================

//! ## Overview
//! The `interfaces` getter answers `{"interfaces": {name: {...}}}`; records
//! address interfaces by `name`.

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
use serde_json::Value;

use crate::operations::NapalmGetter;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.napalm_interfaces";

/// Test class name.
pub const CLASS_NAME: &str = "TestNapalmInterfaces";

/// Interface attributes compared against same-named `test_data` fields.
const INTERFACE_ATTRIBUTES: &[&str] = &["is_enabled", "is_up", "mac_address", "mtu", "speed"];

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Extracts the `interfaces` mapping of each host.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfacesExtractor;

impl ResultExtractor for InterfacesExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        Ok(Value::Object(object_field(host, payload, "interfaces")?.clone()))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    let mut class = TestClass::new(CLASS_NAME, NapalmGetter::new("interfaces"))
        .with_extractor(InterfacesExtractor)
        .with_case(CaseTemplate::exists("interface_exists", &["name"]));
    for attribute in INTERFACE_ATTRIBUTES {
        class =
            class.with_case(CaseTemplate::attribute(*attribute, &["name"], attribute, attribute));
    }
    TestModule::new(MODULE_PATH).with_class(class)
}
