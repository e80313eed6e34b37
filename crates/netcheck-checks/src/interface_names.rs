// crates/netcheck-checks/src/interface_names.rs
// ============================================================================
// Module: Interface Names
// Description: Expansion of abbreviated interface names.
// Purpose: Compare neighbor ports reported as `Gi2` with names like `GigabitEthernet2`.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Devices report remote ports in short form. [`expand_interface_name`] maps
//! a known prefix to its canonical long form and keeps the numbering suffix.
//! Unknown prefixes are returned unchanged.

// ============================================================================
// SECTION: Prefix Table
// ============================================================================

/// Abbreviation (lowercase) to canonical prefix.
const PREFIXES: &[(&str, &str)] = &[
    ("eth", "Ethernet"),
    ("et", "Ethernet"),
    ("fa", "FastEthernet"),
    ("fastethernet", "FastEthernet"),
    ("fo", "FortyGigabitEthernet"),
    ("gi", "GigabitEthernet"),
    ("gig", "GigabitEthernet"),
    ("gigabitethernet", "GigabitEthernet"),
    ("hu", "HundredGigE"),
    ("lo", "Loopback"),
    ("mgmt", "Management"),
    ("po", "Port-channel"),
    ("te", "TenGigabitEthernet"),
    ("tengigabitethernet", "TenGigabitEthernet"),
    ("tu", "Tunnel"),
    ("twe", "TwentyFiveGigE"),
    ("vl", "Vlan"),
];

// ============================================================================
// SECTION: Expansion
// ============================================================================

/// Expands an abbreviated interface name (`Gi2` becomes `GigabitEthernet2`).
#[must_use]
pub fn expand_interface_name(name: &str) -> String {
    let split = name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len());
    let (prefix, suffix) = name.split_at(split);
    let lowered = prefix.trim().to_ascii_lowercase();
    PREFIXES
        .iter()
        .find(|(short, _)| *short == lowered)
        .map_or_else(|| name.to_string(), |(_, long)| format!("{long}{suffix}"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
