// crates/netcheck-core/src/core/bundle.rs
// ============================================================================
// Module: Netcheck Bundle Records
// Description: Authored bundle records as supplied by a description parser.
// Purpose: Define the record shape consumed by the bundle loader.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A bundle is an ordered sequence of [`BundleRecord`] values. Records are
//! supplied already parsed; this module only fixes their shape and the
//! normalization of optional fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::ModulePath;
use crate::core::identifiers::TestClassName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One `test_data` entry: a mapping from field name to value.
pub type TestData = Map<String, Value>;

/// Execution parameters attached to a bundle record.
pub type ExecutionParams = Map<String, Value>;

/// Authored bundle record.
///
/// # Invariants
/// - `test_execution` is never null; a missing or null value becomes an empty map.
/// - Identity is `(module, class, label)`; identical records are still loaded
///   independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleRecord {
    /// Explicit module location; when absent the name index is consulted.
    #[serde(default)]
    pub test_module: Option<ModulePath>,
    /// Declared test class.
    pub test_class: TestClassName,
    /// Optional label distinguishing repeated records.
    #[serde(default)]
    pub label: Option<String>,
    /// Ordered test data records.
    #[serde(default)]
    pub test_data: Vec<TestData>,
    /// Execution parameters handed to the remote operation.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub test_execution: ExecutionParams,
}

impl BundleRecord {
    /// Creates a record for a test class with no module, label, or data.
    #[must_use]
    pub fn new(test_class: impl Into<TestClassName>) -> Self {
        Self {
            test_module: None,
            test_class: test_class.into(),
            label: None,
            test_data: Vec::new(),
            test_execution: ExecutionParams::new(),
        }
    }

    /// Sets an explicit module location.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<ModulePath>) -> Self {
        self.test_module = Some(module.into());
        self
    }

    /// Sets the record label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replaces the test data records.
    #[must_use]
    pub fn with_test_data(mut self, test_data: Vec<TestData>) -> Self {
        self.test_data = test_data;
        self
    }

    /// Replaces the execution parameters.
    #[must_use]
    pub fn with_test_execution(mut self, test_execution: ExecutionParams) -> Self {
        self.test_execution = test_execution;
        self
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes an optional mapping, mapping `null` to an empty map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<ExecutionParams, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ExecutionParams>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
