// crates/netcheck-checks/src/napalm_get_users.rs
// ============================================================================
// Module: NAPALM Users Check
// Description: Local user accounts and privilege levels.
// Purpose: Assert configured users, passwords, and levels per host.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! The `users` getter answers `{"users": {name: {level, password, sshkeys}}}`.
//! The extractor exposes the inner mapping so records address users directly
//! by `username`.

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
pub const MODULE_PATH: &str = "netcheck.checks.napalm_get_users";

/// Test class name.
pub const CLASS_NAME: &str = "TestNapalmUsers";

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Extracts the `users` mapping of each host.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersExtractor;

impl ResultExtractor for UsersExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        let payload = primary_success(host, outcomes)?;
        Ok(Value::Object(object_field(host, payload, "users")?.clone()))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    TestModule::new(MODULE_PATH).with_class(
        TestClass::new(CLASS_NAME, NapalmGetter::new("users"))
            .with_extractor(UsersExtractor)
            .with_case(CaseTemplate::exists("user_exists", &["username"]))
            .with_case(CaseTemplate::attribute("password", &["username"], "password", "password"))
            .with_case(CaseTemplate::attribute("privilege_level", &["username"], "level", "level")),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
