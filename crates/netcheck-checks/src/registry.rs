// crates/netcheck-checks/src/registry.rs
// ============================================================================
// Module: Built-in Module Registry
// Description: Registration of the built-in test modules and their index.
// Purpose: Provide a ready catalog and class-name index for bundle loading.
// Dependencies: netcheck-core
// ============================================================================

//! ## Overview
//! The built-in index is derived from the modules themselves, so every
//! indexed class is importable from the catalog built alongside it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcheck_core::CatalogError;
use netcheck_core::ModuleCatalog;
use netcheck_core::ModuleIndex;
use netcheck_core::TestModule;

use crate::napalm_bgp_neighbors;
use crate::napalm_get_users;
use crate::napalm_interfaces;
use crate::napalm_lldp_neighbors;
use crate::napalm_network_instances;
use crate::netmiko_cdp_neighbors;
use crate::netmiko_ospf_neighbors;
use crate::netmiko_ping;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Builds every built-in module.
#[must_use]
pub fn builtin_modules() -> Vec<TestModule> {
    vec![
        napalm_get_users::module(),
        napalm_lldp_neighbors::module(),
        napalm_bgp_neighbors::module(),
        napalm_interfaces::module(),
        napalm_network_instances::module(),
        netmiko_cdp_neighbors::module(),
        netmiko_ospf_neighbors::module(),
        netmiko_ping::module(),
    ]
}

/// Registers every built-in module into `catalog`.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateModule`] when a built-in location is
/// already registered.
pub fn register_builtin_modules(catalog: &mut ModuleCatalog) -> Result<(), CatalogError> {
    for module in builtin_modules() {
        catalog.register(module)?;
    }
    Ok(())
}

/// Returns a catalog holding only the built-in modules.
///
/// # Errors
///
/// Returns [`CatalogError`] when two built-in modules share a location.
pub fn builtin_catalog() -> Result<ModuleCatalog, CatalogError> {
    let mut catalog = ModuleCatalog::new();
    register_builtin_modules(&mut catalog)?;
    Ok(catalog)
}

/// Returns the class-name index of the built-in modules.
#[must_use]
pub fn builtin_index() -> ModuleIndex {
    let mut entries = Vec::new();
    for module in builtin_modules() {
        for class in module.class_names() {
            entries.push((class.clone(), module.path().clone()));
        }
    }
    entries.into_iter().collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only panic-based assertions are permitted.")]

    use super::builtin_catalog;
    use super::builtin_index;

    #[test]
    fn every_indexed_class_is_importable() {
        let catalog = builtin_catalog().unwrap();
        let index = builtin_index();
        assert_eq!(index.len(), 10);
        for (class, path) in index.entries() {
            let module = catalog.import(path.as_str()).unwrap();
            assert!(module.class(class.as_str()).is_some(), "{class} missing from {path}");
        }
    }

    #[test]
    fn registering_twice_reports_duplicate() {
        let mut catalog = builtin_catalog().unwrap();
        let err = super::register_builtin_modules(&mut catalog).unwrap_err();
        assert!(err.to_string().starts_with("module already registered: "));
    }
}
