// crates/netcheck-core/src/core/mod.rs
// ============================================================================
// Module: Netcheck Core Types
// Description: Canonical bundle, result, and test-case structures.
// Purpose: Provide stable, serializable types shared by runtime and integrations.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe what flows through the pipeline: bundle records as
//! authored, per-host attempt outcomes as returned by a backend, transformed
//! lookup structures, and the ephemeral test cases handed to the evaluator.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bundle;
pub mod case;
pub mod identifiers;
pub mod results;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleRecord;
pub use bundle::ExecutionParams;
pub use bundle::TestData;
pub use case::ActualResult;
pub use case::Operator;
pub use case::ResultType;
pub use case::TestCase;
pub use identifiers::HostName;
pub use identifiers::ModulePath;
pub use identifiers::TaskId;
pub use identifiers::TestClassName;
pub use results::AggregatedResult;
pub use results::AttemptOutcome;
pub use results::FailureDetail;
pub use results::TransformedResult;
