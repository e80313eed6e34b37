// crates/netcheck-checks/src/lib.rs
// ============================================================================
// Module: Netcheck Checks
// Description: Built-in test modules for common device state assertions.
// Purpose: Provide ready test classes, their extractors, and a default index.
// Dependencies: netcheck-core, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the built-in test modules: NAPALM getters (users, LLDP,
//! BGP, interfaces, network instances) and Netmiko commands (CDP, OSPF,
//! ping). Each module declares its classes with an operation, an extractor,
//! and case templates. [`builtin_catalog`] and [`builtin_index`] wire them
//! into a [`netcheck_core::BundleLoader`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod interface_names;
pub mod napalm_bgp_neighbors;
pub mod napalm_get_users;
pub mod napalm_interfaces;
pub mod napalm_lldp_neighbors;
pub mod napalm_network_instances;
pub mod netmiko_cdp_neighbors;
pub mod netmiko_ospf_neighbors;
pub mod netmiko_ping;
pub mod operations;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use interface_names::expand_interface_name;
pub use netmiko_ping::PingOutcome;
pub use netmiko_ping::parse_ping_output;
pub use operations::NapalmGetter;
pub use operations::NetmikoCommand;
pub use operations::hosts_from_test_data;
pub use registry::builtin_catalog;
pub use registry::builtin_index;
pub use registry::builtin_modules;
pub use registry::register_builtin_modules;
