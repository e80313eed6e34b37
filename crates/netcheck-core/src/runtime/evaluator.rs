// crates/netcheck-core/src/runtime/evaluator.rs
// ============================================================================
// Module: Netcheck Evaluator
// Description: Comparison of expected and actual values under an operator.
// Purpose: Decide pass, mismatch, or execution failure for each test case.
// Dependencies: crate::{core, runtime}, bigdecimal, serde, serde_json
// ============================================================================

//! ## Overview
//! The evaluator is a pure function of a [`TestCase`]:
//! - `eq` compares two sequences as sets and anything else directly.
//! - `lt` and `gt` order `expected` against `actual`; values of different
//!   kinds are not comparable and evaluate to `false`.
//! - `neq` is the negation of direct equality.
//!
//! Numbers compare decimal-aware, so `1` equals `1.0`. An actual value that
//! displays as [`ERROR_SENTINEL`] always fails and is reported as an
//! execution failure rather than a mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Number;
use serde_json::Value;

use crate::core::Operator;
use crate::core::ResultType;
use crate::core::TestCase;
use crate::runtime::events::NoopEventSink;
use crate::runtime::events::RunEvent;
use crate::runtime::events::RunEventSink;

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Actual value marking a host whose operation failed.
pub const ERROR_SENTINEL: &str = "ERROR";

/// Outcome class of an evaluated case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Comparison held.
    Passed,
    /// Comparison did not hold.
    Mismatch,
    /// The actual value is the error sentinel.
    ExecutionFailed,
}

impl Verdict {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Mismatch => "mismatch",
            Self::ExecutionFailed => "execution_failed",
        }
    }

    /// Returns true for [`Verdict::Passed`].
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Rendered evaluation of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Verdict.
    pub verdict: Verdict,
    /// Rendered expected value.
    pub expected: String,
    /// Rendered actual value.
    pub actual: String,
    /// Human-readable report line.
    pub message: String,
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Returns true when the case passes.
#[must_use]
pub fn evaluate(case: &TestCase) -> bool {
    if is_execution_failure(case) {
        return false;
    }
    compare(case.operator, &case.expected, &case.actual.result)
}

/// Applies an operator to raw expected and actual values.
#[must_use]
pub fn compare(operator: Operator, expected: &Value, actual: &Value) -> bool {
    match operator {
        Operator::Eq => match (expected, actual) {
            (Value::Array(left), Value::Array(right)) => set_equal(left, right),
            _ => values_equal(expected, actual),
        },
        Operator::Neq => !values_equal(expected, actual),
        Operator::Lt => order(expected, actual).is_some_and(Ordering::is_lt),
        Operator::Gt => order(expected, actual).is_some_and(Ordering::is_gt),
    }
}

/// Classifies a case.
#[must_use]
pub fn verdict(case: &TestCase) -> Verdict {
    if is_execution_failure(case) {
        Verdict::ExecutionFailed
    } else if compare(case.operator, &case.expected, &case.actual.result) {
        Verdict::Passed
    } else {
        Verdict::Mismatch
    }
}

/// Renders the expected side.
#[must_use]
pub fn expected_display(case: &TestCase) -> String {
    render(case.actual.resulttype, &case.expected)
}

/// Renders the actual side.
#[must_use]
pub fn actual_display(case: &TestCase) -> String {
    render(case.actual.resulttype, &case.actual.result)
}

/// Evaluates and renders a case.
#[must_use]
pub fn report(case: &TestCase) -> CaseReport {
    let verdict = verdict(case);
    let expected = expected_display(case);
    let actual = actual_display(case);
    let message = match verdict {
        Verdict::ExecutionFailed => {
            format!("{}: failed | error while executing the test", case.name)
        }
        Verdict::Passed | Verdict::Mismatch => format!(
            "{}: {} | Expected: {expected} {} Actual: {actual}",
            case.name,
            if verdict.passed() { "passed" } else { "failed" },
            case.operator.symbol(),
        ),
    };
    CaseReport {
        name: case.name.clone(),
        operator: case.operator,
        verdict,
        expected,
        actual,
        message,
    }
}

/// Returns true when the actual side renders as the error sentinel.
fn is_execution_failure(case: &TestCase) -> bool {
    actual_display(case) == ERROR_SENTINEL
}

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Evaluator that records a `case_evaluated` event per case.
#[derive(Clone)]
pub struct Evaluator {
    /// Event destination.
    events: Arc<dyn RunEventSink>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Arc::new(NoopEventSink))
    }
}

impl Evaluator {
    /// Creates an evaluator with an event sink.
    #[must_use]
    pub fn new(events: Arc<dyn RunEventSink>) -> Self {
        Self {
            events,
        }
    }

    /// Evaluates one case and records the event.
    #[must_use]
    pub fn evaluate(&self, case: &TestCase) -> CaseReport {
        let report = report(case);
        self.events.record(&RunEvent::case_evaluated(
            report.name.clone(),
            report.verdict.as_str(),
            case.operator,
            case.expected.clone(),
            case.actual.result.clone(),
        ));
        report
    }

    /// Evaluates cases in order.
    #[must_use]
    pub fn evaluate_all(&self, cases: &[TestCase]) -> Vec<CaseReport> {
        cases.iter().map(|case| self.evaluate(case)).collect()
    }
}

// ============================================================================
// SECTION: Value Helpers
// ============================================================================

/// Renders a value; sequences in `multiple` mode are space-joined.
fn render(resulttype: ResultType, value: &Value) -> String {
    match (resulttype, value) {
        (ResultType::Multiple, Value::Array(items)) => {
            items.iter().map(render_scalar).collect::<Vec<_>>().join(" ")
        }
        _ => render_scalar(value),
    }
}

/// Renders a value with strings unquoted.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Set equality: order and duplicates are ignored.
fn set_equal(left: &[Value], right: &[Value]) -> bool {
    left.iter().all(|item| right.iter().any(|other| values_equal(item, other)))
        && right.iter().all(|item| left.iter().any(|other| values_equal(item, other)))
}

/// Structural equality with decimal-aware numbers.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            decimal_cmp(left, right).is_some_and(Ordering::is_eq)
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(left, right)| values_equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right.get(key).is_some_and(|other| values_equal(value, other))
                })
        }
        _ => left == right,
    }
}

/// Orders two values of the same kind; `None` when not comparable.
fn order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => decimal_cmp(left, right),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        (Value::Array(left), Value::Array(right)) => {
            for (left, right) in left.iter().zip(right) {
                match order(left, right)? {
                    Ordering::Equal => {}
                    unequal => return Some(unequal),
                }
            }
            Some(left.len().cmp(&right.len()))
        }
        _ => None,
    }
}

/// Orders numeric JSON values using decimal-aware comparison.
fn decimal_cmp(left: &Number, right: &Number) -> Option<Ordering> {
    let left = BigDecimal::from_str(&left.to_string()).ok()?;
    let right = BigDecimal::from_str(&right.to_string()).ok()?;
    Some(left.cmp(&right))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
