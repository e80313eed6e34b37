// crates/netcheck-core/src/runtime/index.rs
// ============================================================================
// Module: Netcheck Name Index
// Description: Mapping from test class names to module locations.
// Purpose: Let bundles name only a test class and omit its module.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! The name index is an immutable value constructed once and passed to the
//! bundle loader. It has no partial-update API: callers scoping a run to
//! custom test types build a whole replacement index instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::ModulePath;
use crate::core::TestClassName;

// ============================================================================
// SECTION: Module Index
// ============================================================================

/// Immutable class-name to module-location index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleIndex {
    /// Module locations keyed by test class name.
    entries: BTreeMap<TestClassName, ModulePath>,
}

impl ModuleIndex {
    /// Creates an index from a complete mapping.
    #[must_use]
    pub const fn new(entries: BTreeMap<TestClassName, ModulePath>) -> Self {
        Self {
            entries,
        }
    }

    /// Creates an index with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Resolves a test class name to its module location.
    #[must_use]
    pub fn resolve(&self, class_name: &str) -> Option<&ModulePath> {
        self.entries.get(class_name)
    }

    /// Iterates entries in class-name order.
    pub fn entries(&self) -> impl Iterator<Item = (&TestClassName, &ModulePath)> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, M> FromIterator<(C, M)> for ModuleIndex
where
    C: Into<TestClassName>,
    M: Into<ModulePath>,
{
    fn from_iter<I: IntoIterator<Item = (C, M)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(class, module)| (class.into(), module.into())).collect())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ModuleIndex;

    #[test]
    fn resolves_known_class() {
        let index: ModuleIndex =
            [("TestFixture", "tests.base_tests.class_loading")].into_iter().collect();
        assert_eq!(
            index.resolve("TestFixture").map(|module| module.as_str()),
            Some("tests.base_tests.class_loading")
        );
    }

    #[test]
    fn unknown_class_is_none() {
        assert!(ModuleIndex::empty().resolve("TestFixture").is_none());
    }
}
