// crates/netcheck-checks/tests/proptest_interface_names.rs
// ============================================================================
// Module: Interface Name Property Tests
// Description: Property checks for interface name expansion.
// Purpose: Ensure expansion is stable and keeps the numbering suffix.
// ============================================================================

//! Interface name expansion property tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use netcheck_checks::expand_interface_name;
use proptest::prelude::*;

proptest! {
    #[test]
    fn expansion_is_idempotent(name in "[A-Za-z-]{0,16}[0-9/.]{0,8}") {
        let once = expand_interface_name(&name);
        prop_assert_eq!(expand_interface_name(&once), once);
    }

    #[test]
    fn expansion_keeps_numbering(
        prefix in prop::sample::select(vec!["Gi", "gi", "Te", "Fa", "Po", "Lo", "Vl"]),
        numbering in "[0-9]{1,2}(/[0-9]{1,2}){0,2}",
    ) {
        let expanded = expand_interface_name(&format!("{prefix}{numbering}"));
        prop_assert!(expanded.ends_with(&numbering));
        prop_assert!(expanded.len() > prefix.len() + numbering.len());
    }
}
