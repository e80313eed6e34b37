// crates/netcheck-core/src/runtime/cases.rs
// ============================================================================
// Module: Netcheck Case Generation
// Description: Expansion of test data records into evaluator test cases.
// Purpose: Pair every record with every assertion template of its class.
// Dependencies: crate::{core, runtime}, serde, serde_json
// ============================================================================

//! ## Overview
//! Every `test_data` record is crossed with every [`CaseTemplate`] of the
//! spec's class. The host named by the record selects the host entry in the
//! transformed result; a missing or failed host yields the
//! [`ERROR_SENTINEL`] as actual value. A missing key path yields `null`, which
//! evaluates as a mismatch. Records lacking a field a template needs are
//! skipped and reported instead of producing a case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::AttemptOutcome;
use crate::core::TestCase;
use crate::core::TestData;
use crate::core::TransformedResult;
use crate::runtime::catalog::CaseCheck;
use crate::runtime::catalog::CaseTemplate;
use crate::runtime::evaluator::ERROR_SENTINEL;
use crate::runtime::loader::TestSpec;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A record/template pair that produced no case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Zero-based record position in `test_data`.
    pub position: usize,
    /// Template that could not be applied.
    pub template: String,
    /// First required field the record lacks.
    pub missing_field: String,
}

/// Output of [`generate_cases`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCases {
    /// Cases in record order, then template order.
    pub cases: Vec<TestCase>,
    /// Pairs that were skipped.
    pub skipped: Vec<SkippedRecord>,
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Expands a spec's `test_data` against its templates.
#[must_use]
pub fn generate_cases(spec: &TestSpec, transformed: &TransformedResult) -> GeneratedCases {
    let mut generated = GeneratedCases::default();
    for (position, record) in spec.test_data.iter().enumerate() {
        for template in spec.definition().cases() {
            match build_case(template, record, transformed) {
                Ok(case) => generated.cases.push(case),
                Err(missing_field) => generated.skipped.push(SkippedRecord {
                    position,
                    template: template.name.clone(),
                    missing_field,
                }),
            }
        }
    }
    generated
}

/// Builds one case, or returns the name of the missing field.
fn build_case(
    template: &CaseTemplate,
    record: &TestData,
    transformed: &TransformedResult,
) -> Result<TestCase, String> {
    let field = |name: &str| {
        record.get(name).filter(|value| !value.is_null()).ok_or_else(|| name.to_string())
    };
    let host = key_text(field(&template.host_field)?);
    let path = template
        .key_fields
        .iter()
        .map(|key| field(key).map(key_text))
        .collect::<Result<Vec<_>, _>>()?;
    let name = case_name(&template.name, &host, &path);
    let outcome = transformed.host(&host).filter(|outcome| !outcome.failed());

    let (expected, actual) = match &template.check {
        CaseCheck::Exists => (
            Value::Bool(true),
            outcome.map(|outcome| Value::Bool(outcome.lookup(path.as_slice()).is_some())),
        ),
        CaseCheck::Compare {
            attribute,
            expected_field,
        } => {
            let mut full_path = path;
            full_path.extend(attribute.iter().cloned());
            (
                field(expected_field)?.clone(),
                outcome.map(|outcome| lookup_or_null(outcome, &full_path)),
            )
        }
        CaseCheck::Count {
            expected_field,
        } => (field(expected_field)?.clone(), outcome.map(|outcome| count_at(outcome, &path))),
    };
    let actual = actual.unwrap_or_else(|| Value::String(ERROR_SENTINEL.to_string()));
    Ok(if expected.is_array() {
        TestCase::multiple(name, template.operator, expected, actual)
    } else {
        TestCase::single(name, template.operator, expected, actual)
    })
}

/// Renders a record value used as host name or key segment.
fn key_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Builds `template[host-key-...]`.
fn case_name(template: &str, host: &str, path: &[String]) -> String {
    let mut params = vec![host];
    params.extend(path.iter().map(String::as_str));
    format!("{template}[{}]", params.join("-"))
}

/// Reads the value at a path, `null` when absent.
fn lookup_or_null(outcome: &AttemptOutcome, path: &[String]) -> Value {
    outcome.lookup(path).cloned().unwrap_or(Value::Null)
}

/// Counts entries of the collection at a path, `null` when absent or scalar.
fn count_at(outcome: &AttemptOutcome, path: &[String]) -> Value {
    match outcome.lookup(path) {
        Some(Value::Array(items)) => Value::from(items.len()),
        Some(Value::Object(entries)) => Value::from(entries.len()),
        _ => Value::Null,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
