// crates/netcheck-checks/src/netmiko_ping.rs
// ============================================================================
// Module: Netmiko Ping Check
// Description: Reachability from source hosts to destinations.
// Purpose: Classify ping answers as success, failure, or flapping.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! Records name a `source` host, a `destination`, and the `expected`
//! classification. The multi-host ping task pings every destination listed
//! for a source; its first attempt is the parent task and is skipped, each
//! later attempt is the raw output of one ping. Outputs are classified by
//! success rate:
//! - `100 percent (5/5)` is `SUCCESS`,
//! - `0 percent (0/5)` is `FAIL`,
//! - anything else is `FLAPPING`.
//!
//! The parent attempt must succeed. A failed ping attempt, or an output
//! without an `Echos to <destination>, timeout is` banner, cannot be matched
//! to a destination and fails the source host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use netcheck_core::Arguments;
use netcheck_core::AttemptOutcome;
use netcheck_core::CaseTemplate;
use netcheck_core::ExtractError;
use netcheck_core::HostFilter;
use netcheck_core::HostName;
use netcheck_core::OperationBuilder;
use netcheck_core::ResultExtractor;
use netcheck_core::TaskId;
use netcheck_core::TestClass;
use netcheck_core::TestModule;
use netcheck_core::TestSpec;
use netcheck_core::runtime::extract::primary_success;
use serde_json::Map;
use serde_json::Value;

use crate::operations::hosts_from_test_data;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Module location.
pub const MODULE_PATH: &str = "netcheck.checks.netmiko_ping";

/// Test class name.
pub const CLASS_NAME: &str = "TestNetmikoPing";

/// Task identifier of the multi-host ping task.
pub const PING_TASK: &str = "netmiko_ping_multi_host";

/// `test_data` field naming the source host.
const SOURCE_FIELD: &str = "source";

/// `test_data` field naming the destination.
const DESTINATION_FIELD: &str = "destination";

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Ping classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    /// All echoes answered.
    Success,
    /// No echo answered.
    Fail,
    /// Some echoes answered.
    Flapping,
}

impl PingOutcome {
    /// Returns the label compared against `expected`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
            Self::Flapping => "FLAPPING",
        }
    }
}

/// Parses one raw ping output into its destination and classification.
#[must_use]
pub fn parse_ping_output(output: &str) -> Option<(String, PingOutcome)> {
    let (_, after) = output.split_once("Echos to ")?;
    let (destination, _) = after.split_once(", timeout is")?;
    let outcome = if output.contains("Success rate is 100 percent (5/5)") {
        PingOutcome::Success
    } else if output.contains("Success rate is 0 percent (0/5)") {
        PingOutcome::Fail
    } else {
        PingOutcome::Flapping
    };
    Some((destination.trim().to_string(), outcome))
}

// ============================================================================
// SECTION: Operation
// ============================================================================

/// Multi-host ping operation.
///
/// Arguments carry `destinations_per_host` (source to destination list) and
/// the `delay_factor` from `test_execution`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingOperation;

impl OperationBuilder for PingOperation {
    fn task(&self, _spec: &TestSpec) -> TaskId {
        TaskId::new(PING_TASK)
    }

    fn arguments(&self, spec: &TestSpec) -> Arguments {
        let mut destinations: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
        for record in &spec.test_data {
            if let (Some(source), Some(destination)) = (
                record.get(SOURCE_FIELD).and_then(Value::as_str),
                record.get(DESTINATION_FIELD),
            ) {
                destinations.entry(source).or_default().push(destination.clone());
            }
        }
        let destinations: Map<String, Value> = destinations
            .into_iter()
            .map(|(source, list)| (source.to_string(), Value::Array(list)))
            .collect();
        let mut arguments = Arguments::new();
        arguments.insert("destinations_per_host".to_string(), Value::Object(destinations));
        arguments.insert(
            "delay_factor".to_string(),
            spec.test_execution.get("delay_factor").cloned().unwrap_or(Value::Null),
        );
        arguments
    }

    fn host_filter(&self, spec: &TestSpec) -> Option<HostFilter> {
        Some(hosts_from_test_data(spec, SOURCE_FIELD))
    }
}

// ============================================================================
// SECTION: Extractor
// ============================================================================

/// Classifies every ping issued by a source host, keyed by destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingExtractor;

impl ResultExtractor for PingExtractor {
    fn single_transform(
        &self,
        host: &HostName,
        outcomes: &[AttemptOutcome],
    ) -> Result<Value, ExtractError> {
        primary_success(host, outcomes)?;
        let mut classified = Map::new();
        for (attempt, outcome) in outcomes.iter().enumerate().skip(1) {
            let output = match outcome {
                AttemptOutcome::Success(output) => output,
                AttemptOutcome::Failure(detail) => {
                    return Err(ExtractError::Shape {
                        host: host.to_string(),
                        reason: format!("ping attempt {attempt} failed: {detail}"),
                    });
                }
            };
            let Some((destination, class)) = output.as_str().and_then(parse_ping_output) else {
                return Err(ExtractError::Shape {
                    host: host.to_string(),
                    reason: format!("ping attempt {attempt} names no destination"),
                });
            };
            classified.insert(destination, Value::from(class.as_str()));
        }
        Ok(Value::Object(classified))
    }
}

// ============================================================================
// SECTION: Module
// ============================================================================

/// Builds the module.
#[must_use]
pub fn module() -> TestModule {
    TestModule::new(MODULE_PATH).with_class(
        TestClass::new(CLASS_NAME, PingOperation).with_extractor(PingExtractor).with_case(
            CaseTemplate::value("ping", &[DESTINATION_FIELD], "expected")
                .with_host_field(SOURCE_FIELD),
        ),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only panic-based assertions are permitted.")]

    use netcheck_core::AttemptOutcome;
    use netcheck_core::ExtractError;
    use netcheck_core::HostName;
    use netcheck_core::ResultExtractor;
    use serde_json::Value;
    use serde_json::json;

    use super::PingExtractor;
    use super::PingOutcome;
    use super::parse_ping_output;

    fn output(destination: &str, rate: &str) -> String {
        format!(
            "Type escape sequence to abort.\nSending 5, 100-byte ICMP Echos to {destination}, \
             timeout is 2 seconds:\n!!!!!\nSuccess rate is {rate}, \
             round-trip min/avg/max = 1/1/2 ms"
        )
    }

    #[test]
    fn classifies_success_rates() {
        assert_eq!(
            parse_ping_output(&output("172.16.23.3", "100 percent (5/5)")),
            Some(("172.16.23.3".to_string(), PingOutcome::Success))
        );
        assert_eq!(
            parse_ping_output(&output("172.16.23.3", "0 percent (0/5)")),
            Some(("172.16.23.3".to_string(), PingOutcome::Fail))
        );
        assert_eq!(
            parse_ping_output(&output("172.16.23.3", "60 percent (3/5)")),
            Some(("172.16.23.3".to_string(), PingOutcome::Flapping))
        );
    }

    #[test]
    fn output_without_banner_names_no_destination() {
        assert_eq!(parse_ping_output("% Unrecognized host or address"), None);
    }

    #[test]
    fn failed_source_host_is_rejected() {
        let host = HostName::new("R3");
        let outcomes = [AttemptOutcome::failure("timeout", "connection timed out")];
        assert_eq!(
            PingExtractor.single_transform(&host, &outcomes).unwrap_err(),
            ExtractError::HostFailed {
                host: "R3".to_string(),
            }
        );
    }

    #[test]
    fn unmatched_ping_output_fails_the_host() {
        let host = HostName::new("R1");
        let outcomes = [
            AttemptOutcome::Success(Value::Null),
            AttemptOutcome::Success(Value::String(output("10.0.0.2", "100 percent (5/5)"))),
            AttemptOutcome::Success(json!("% Unrecognized host or address")),
        ];
        assert_eq!(
            PingExtractor.single_transform(&host, &outcomes).unwrap_err(),
            ExtractError::Shape {
                host: "R1".to_string(),
                reason: "ping attempt 2 names no destination".to_string(),
            }
        );
    }

    #[test]
    fn classifies_every_ping_after_the_parent_attempt() {
        let host = HostName::new("R1");
        let outcomes = [
            AttemptOutcome::Success(Value::Null),
            AttemptOutcome::Success(Value::String(output("10.0.0.2", "100 percent (5/5)"))),
            AttemptOutcome::Success(Value::String(output("10.0.0.3", "0 percent (0/5)"))),
        ];
        assert_eq!(
            PingExtractor.single_transform(&host, &outcomes).unwrap(),
            json!({"10.0.0.2": "SUCCESS", "10.0.0.3": "FAIL"})
        );
    }
}
