// crates/netcheck-core/src/runtime/catalog.rs
// ============================================================================
// Module: Netcheck Module Catalog
// Description: Explicit registry of test modules and their test classes.
// Purpose: Resolve module locations and class names to executable definitions.
// Dependencies: crate::{core, interfaces}, serde, thiserror
// ============================================================================

//! ## Overview
//! A module location resolves only when a [`TestModule`] has been registered
//! for it in the [`ModuleCatalog`]; this is the "import" step of bundle
//! loading. Each module owns named [`TestClass`] definitions, and each class
//! carries:
//! - an [`OperationBuilder`] for the remote operation,
//! - an optional [`ResultExtractor`] (identity when absent),
//! - the [`CaseTemplate`] list that turns `test_data` into assertions.
//!
//! Registration is explicit; nothing is discovered by convention.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::core::ModulePath;
use crate::core::Operator;
use crate::core::TestClassName;
use crate::interfaces::OperationBuilder;
use crate::interfaces::ResultExtractor;
use crate::runtime::extract::IdentityExtractor;

// ============================================================================
// SECTION: Case Templates
// ============================================================================

/// Default `test_data` field naming the host under test.
pub const DEFAULT_HOST_FIELD: &str = "host";

/// What an assertion template checks at its key path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseCheck {
    /// The key path exists under the host's payload.
    Exists,
    /// The value at the key path (plus optional attribute) matches a record field.
    Compare {
        /// Attribute read below the key path, if any.
        attribute: Option<String>,
        /// `test_data` field holding the expected value.
        expected_field: String,
    },
    /// The number of entries at the key path matches a record field.
    Count {
        /// `test_data` field holding the expected count.
        expected_field: String,
    },
}

/// Assertion template applied to every `test_data` record of a spec.
///
/// # Invariants
/// - `key_fields` are `test_data` fields whose values form the lookup path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseTemplate {
    /// Template name; generated case names derive from it.
    pub name: String,
    /// `test_data` field naming the host.
    pub host_field: String,
    /// `test_data` fields forming the key path.
    pub key_fields: Vec<String>,
    /// Check performed at the key path.
    pub check: CaseCheck,
    /// Comparison operator.
    pub operator: Operator,
}

impl CaseTemplate {
    /// Template checking that the key path exists.
    #[must_use]
    pub fn exists(name: impl Into<String>, key_fields: &[&str]) -> Self {
        Self::with_check(name, key_fields, CaseCheck::Exists)
    }

    /// Template comparing an attribute below the key path with a record field.
    #[must_use]
    pub fn attribute(
        name: impl Into<String>,
        key_fields: &[&str],
        attribute: &str,
        expected_field: &str,
    ) -> Self {
        Self::with_check(
            name,
            key_fields,
            CaseCheck::Compare {
                attribute: Some(attribute.to_string()),
                expected_field: expected_field.to_string(),
            },
        )
    }

    /// Template comparing the value at the key path itself with a record field.
    #[must_use]
    pub fn value(name: impl Into<String>, key_fields: &[&str], expected_field: &str) -> Self {
        Self::with_check(
            name,
            key_fields,
            CaseCheck::Compare {
                attribute: None,
                expected_field: expected_field.to_string(),
            },
        )
    }

    /// Template comparing the entry count at the key path with a record field.
    #[must_use]
    pub fn count(name: impl Into<String>, key_fields: &[&str], expected_field: &str) -> Self {
        Self::with_check(
            name,
            key_fields,
            CaseCheck::Count {
                expected_field: expected_field.to_string(),
            },
        )
    }

    /// Overrides the host field.
    #[must_use]
    pub fn with_host_field(mut self, host_field: &str) -> Self {
        self.host_field = host_field.to_string();
        self
    }

    /// Overrides the operator.
    #[must_use]
    pub const fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Builds a template with default host field and operator.
    fn with_check(name: impl Into<String>, key_fields: &[&str], check: CaseCheck) -> Self {
        Self {
            name: name.into(),
            host_field: DEFAULT_HOST_FIELD.to_string(),
            key_fields: key_fields.iter().map(|field| (*field).to_string()).collect(),
            check,
            operator: Operator::Eq,
        }
    }
}

// ============================================================================
// SECTION: Test Classes
// ============================================================================

/// Executable definition of a test class.
#[derive(Clone)]
pub struct TestClass {
    /// Class name.
    name: TestClassName,
    /// Operation builder.
    operation: Arc<dyn OperationBuilder>,
    /// Result extractor; identity when absent.
    extractor: Option<Arc<dyn ResultExtractor>>,
    /// Assertion templates.
    cases: Vec<CaseTemplate>,
}

impl TestClass {
    /// Creates a class with the given operation, no extractor, and no cases.
    #[must_use]
    pub fn new(
        name: impl Into<TestClassName>,
        operation: impl OperationBuilder + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            operation: Arc::new(operation),
            extractor: None,
            cases: Vec::new(),
        }
    }

    /// Sets the result extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl ResultExtractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Sets a shared result extractor.
    #[must_use]
    pub fn with_shared_extractor(mut self, extractor: Arc<dyn ResultExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Appends an assertion template.
    #[must_use]
    pub fn with_case(mut self, case: CaseTemplate) -> Self {
        self.cases.push(case);
        self
    }

    /// Returns the class name.
    #[must_use]
    pub const fn name(&self) -> &TestClassName {
        &self.name
    }

    /// Returns the operation builder.
    #[must_use]
    pub fn operation(&self) -> &dyn OperationBuilder {
        self.operation.as_ref()
    }

    /// Returns the extractor, falling back to identity.
    #[must_use]
    pub fn extractor(&self) -> Arc<dyn ResultExtractor> {
        self.extractor.clone().unwrap_or_else(|| Arc::new(IdentityExtractor))
    }

    /// Returns the assertion templates.
    #[must_use]
    pub fn cases(&self) -> &[CaseTemplate] {
        &self.cases
    }
}

impl fmt::Debug for TestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestClass")
            .field("name", &self.name)
            .field("has_extractor", &self.extractor.is_some())
            .field("cases", &self.cases)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Test Modules
// ============================================================================

/// Named group of test classes reachable by module location.
#[derive(Debug, Clone)]
pub struct TestModule {
    /// Module location.
    path: ModulePath,
    /// Classes keyed by name.
    classes: BTreeMap<TestClassName, Arc<TestClass>>,
}

impl TestModule {
    /// Creates an empty module.
    #[must_use]
    pub fn new(path: impl Into<ModulePath>) -> Self {
        Self {
            path: path.into(),
            classes: BTreeMap::new(),
        }
    }

    /// Adds a class; a later class with the same name replaces the earlier one.
    #[must_use]
    pub fn with_class(mut self, class: TestClass) -> Self {
        self.classes.insert(class.name.clone(), Arc::new(class));
        self
    }

    /// Returns the module location.
    #[must_use]
    pub const fn path(&self) -> &ModulePath {
        &self.path
    }

    /// Returns a class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<Arc<TestClass>> {
        self.classes.get(name).cloned()
    }

    /// Iterates class names in order.
    pub fn class_names(&self) -> impl Iterator<Item = &TestClassName> {
        self.classes.keys()
    }
}

// ============================================================================
// SECTION: Module Catalog
// ============================================================================

/// Catalog registration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A module with the same location is already registered.
    #[error("module already registered: {0}")]
    DuplicateModule(String),
}

/// Registry of importable test modules.
///
/// # Invariants
/// - Module locations are unique within the catalog.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    /// Modules keyed by location.
    modules: BTreeMap<ModulePath, TestModule>,
}

impl ModuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// Registers a module.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateModule`] when the location is taken.
    pub fn register(&mut self, module: TestModule) -> Result<(), CatalogError> {
        if self.modules.contains_key(module.path.as_str()) {
            return Err(CatalogError::DuplicateModule(module.path.to_string()));
        }
        self.modules.insert(module.path.clone(), module);
        Ok(())
    }

    /// Imports a module by location.
    #[must_use]
    pub fn import(&self, path: &str) -> Option<&TestModule> {
        self.modules.get(path)
    }

    /// Iterates registered modules in location order.
    pub fn modules(&self) -> impl Iterator<Item = &TestModule> {
        self.modules.values()
    }
}
