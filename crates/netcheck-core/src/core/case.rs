// crates/netcheck-core/src/core/case.rs
// ============================================================================
// Module: Netcheck Test Cases
// Description: Ephemeral assertion inputs for the evaluator.
// Purpose: Pair an expected value with an actual result under an operator.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`TestCase`] is built per assertion at evaluation time and is never
//! persisted. Operators deserialize from their canonical names (`eq`, `lt`,
//! `gt`, `neq`) and from the symbolic aliases used by older bundles (`=`, `<`,
//! `>`, `not`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operator applied by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equality; set-aware when both sides are sequences.
    #[default]
    #[serde(alias = "=")]
    Eq,
    /// `expected < actual`.
    #[serde(alias = "<")]
    Lt,
    /// `expected > actual`.
    #[serde(alias = ">")]
    Gt,
    /// `expected != actual`.
    #[serde(alias = "not")]
    Neq,
}

impl Operator {
    /// Returns the canonical label for the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Neq => "neq",
        }
    }

    /// Returns the symbol used in rendered reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Neq => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the compared values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Scalar comparison.
    #[default]
    Single,
    /// Sequence comparison; rendered space-joined.
    Multiple,
}

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// Actual side of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualResult {
    /// Value shape.
    pub resulttype: ResultType,
    /// Actual value read from the transformed result.
    pub result: Value,
}

/// One assertion handed to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Case name used in reports.
    pub name: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Expected value.
    pub expected: Value,
    /// Actual value and its shape.
    pub actual: ActualResult,
}

impl TestCase {
    /// Creates a scalar test case.
    #[must_use]
    pub fn single(
        name: impl Into<String>,
        operator: Operator,
        expected: Value,
        actual: Value,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            expected,
            actual: ActualResult {
                resulttype: ResultType::Single,
                result: actual,
            },
        }
    }

    /// Creates a sequence test case.
    #[must_use]
    pub fn multiple(
        name: impl Into<String>,
        operator: Operator,
        expected: Value,
        actual: Value,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            expected,
            actual: ActualResult {
                resulttype: ResultType::Multiple,
                result: actual,
            },
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only panic-based assertions are permitted.")]

    use serde_json::json;

    use super::Operator;

    #[test]
    fn operator_accepts_symbolic_aliases() {
        let parsed: Vec<Operator> =
            serde_json::from_value(json!(["=", "<", ">", "not", "eq", "neq"])).unwrap();
        assert_eq!(
            parsed,
            vec![
                Operator::Eq,
                Operator::Lt,
                Operator::Gt,
                Operator::Neq,
                Operator::Eq,
                Operator::Neq
            ]
        );
    }
}
