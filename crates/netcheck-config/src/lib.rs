// crates/netcheck-config/src/lib.rs
// ============================================================================
// Module: Netcheck Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for netcheck.toml semantics.
// Dependencies: netcheck-core, serde, toml
// ============================================================================

//! ## Overview
//! `netcheck-config` defines the `netcheck.toml` model: index overrides,
//! run event logging, backend fixtures, and input limits. Loading is strict
//! and fails closed on oversized, non-UTF-8, or inconsistent input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
