// crates/netcheck-core/src/runtime/loader.rs
// ============================================================================
// Module: Netcheck Bundle Loader
// Description: Resolution of bundle records into loadable test specs.
// Purpose: Bind each record to a module location and an executable test class.
// Dependencies: crate::{core, runtime}, thiserror
// ============================================================================

//! ## Overview
//! The loader resolves records in input order. An explicit `test_module` is
//! used as-is and the name index is never consulted for it; otherwise the
//! index supplies the location. The location is then imported from the
//! module catalog. Resolution failures are [`UsageError`] values that name
//! the offending identifier and affect only their own record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::BundleRecord;
use crate::core::ExecutionParams;
use crate::core::ModulePath;
use crate::core::TestClassName;
use crate::core::TestData;
use crate::runtime::catalog::ModuleCatalog;
use crate::runtime::catalog::TestClass;
use crate::runtime::index::ModuleIndex;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Bundle resolution errors surfaced to the enclosing test runner.
///
/// # Invariants
/// - Every variant names the identifier that failed to resolve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The record omits `test_module` and the index has no entry for the class.
    #[error("module not found for class: {class}")]
    ModuleNotFoundForClass {
        /// Test class that could not be resolved.
        class: String,
    },
    /// The module location does not resolve to a registered module.
    #[error("module path not found: {module} (class {class})")]
    ModulePathNotFound {
        /// Module location that failed to import.
        module: String,
        /// Test class requested from it.
        class: String,
    },
    /// The module exists but does not define the class.
    #[error("test class not found in module: {class} ({module})")]
    ClassNotInModule {
        /// Missing test class.
        class: String,
        /// Module location searched.
        module: String,
    },
}

// ============================================================================
// SECTION: Test Spec
// ============================================================================

/// Resolved, immutable test specification.
#[derive(Clone)]
pub struct TestSpec {
    /// Resolved module location.
    pub module: ModulePath,
    /// Test class name.
    pub class_name: TestClassName,
    /// Optional record label.
    pub label: Option<String>,
    /// Ordered test data records.
    pub test_data: Vec<TestData>,
    /// Execution parameters (never null).
    pub test_execution: ExecutionParams,
    /// Executable class definition.
    definition: Arc<TestClass>,
}

impl TestSpec {
    /// Creates a spec bound to a class definition.
    #[must_use]
    pub fn new(module: ModulePath, record: &BundleRecord, definition: Arc<TestClass>) -> Self {
        Self {
            module,
            class_name: record.test_class.clone(),
            label: record.label.clone(),
            test_data: record.test_data.clone(),
            test_execution: record.test_execution.clone(),
            definition,
        }
    }

    /// Returns the executable class definition.
    #[must_use]
    pub fn definition(&self) -> &TestClass {
        &self.definition
    }

    /// Returns the reporting name: the class, followed by ` - label` when labelled.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{} - {label}", self.class_name),
            None => self.class_name.to_string(),
        }
    }
}

impl fmt::Debug for TestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSpec")
            .field("module", &self.module)
            .field("class_name", &self.class_name)
            .field("label", &self.label)
            .field("test_data", &self.test_data)
            .field("test_execution", &self.test_execution)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Resolves bundle records against an index and a module catalog.
#[derive(Debug, Clone, Copy)]
pub struct BundleLoader<'a> {
    /// Class-name index used when a record omits its module.
    index: &'a ModuleIndex,
    /// Importable modules.
    catalog: &'a ModuleCatalog,
}

impl<'a> BundleLoader<'a> {
    /// Creates a loader.
    #[must_use]
    pub const fn new(index: &'a ModuleIndex, catalog: &'a ModuleCatalog) -> Self {
        Self {
            index,
            catalog,
        }
    }

    /// Determines the module location of a record.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::ModuleNotFoundForClass`] when the record has no
    /// module and the index has no entry for its class.
    pub fn resolve_module(&self, record: &BundleRecord) -> Result<ModulePath, UsageError> {
        if let Some(module) = &record.test_module {
            return Ok(module.clone());
        }
        self.index.resolve(record.test_class.as_str()).cloned().ok_or_else(|| {
            UsageError::ModuleNotFoundForClass {
                class: record.test_class.to_string(),
            }
        })
    }

    /// Resolves one record into a spec.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] when the module or class cannot be resolved.
    pub fn resolve(&self, record: &BundleRecord) -> Result<TestSpec, UsageError> {
        let module_path = self.resolve_module(record)?;
        let module = self.catalog.import(module_path.as_str()).ok_or_else(|| {
            UsageError::ModulePathNotFound {
                module: module_path.to_string(),
                class: record.test_class.to_string(),
            }
        })?;
        let definition = module.class(record.test_class.as_str()).ok_or_else(|| {
            UsageError::ClassNotInModule {
                class: record.test_class.to_string(),
                module: module_path.to_string(),
            }
        })?;
        Ok(TestSpec::new(module_path, record, definition))
    }

    /// Resolves every record, preserving order; failures stay per record.
    #[must_use]
    pub fn load(&self, records: &[BundleRecord]) -> Vec<Result<TestSpec, UsageError>> {
        records.iter().map(|record| self.resolve(record)).collect()
    }

    /// Resolves every record, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`UsageError`] encountered.
    pub fn load_all(&self, records: &[BundleRecord]) -> Result<Vec<TestSpec>, UsageError> {
        records.iter().map(|record| self.resolve(record)).collect()
    }
}
