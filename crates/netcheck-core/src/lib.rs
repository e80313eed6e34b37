// crates/netcheck-core/src/lib.rs
// ============================================================================
// Module: Netcheck Core Library
// Description: Public API surface for the Netcheck orchestration core.
// Purpose: Expose bundle resolution, execution contexts, extraction, and evaluation.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Netcheck core turns declarative test bundles into evaluated assertions
//! against a fleet of network devices. A bundle record is resolved into a
//! [`TestSpec`], each spec owns one [`ExecutionContext`] that runs the remote
//! operation exactly once through a [`Backend`], a [`ResultExtractor`]
//! reshapes the per-host outcomes, and the evaluator compares expected and
//! actual values.
//!
//! The core is backend-agnostic: device communication, description-file
//! parsing and reporting live outside this crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::Arguments;
pub use interfaces::Backend;
pub use interfaces::BackendError;
pub use interfaces::ExtractError;
pub use interfaces::HostFilter;
pub use interfaces::Operation;
pub use interfaces::OperationBuilder;
pub use interfaces::ResultExtractor;
pub use runtime::BackendFixture;
pub use runtime::BundleLoader;
pub use runtime::BundleRunner;
pub use runtime::CaseCheck;
pub use runtime::CaseReport;
pub use runtime::CaseTemplate;
pub use runtime::CatalogError;
pub use runtime::ContextError;
pub use runtime::ERROR_SENTINEL;
pub use runtime::Evaluator;
pub use runtime::ExecutionContext;
pub use runtime::FileEventSink;
pub use runtime::FnExtractor;
pub use runtime::GeneratedCases;
pub use runtime::IdentityExtractor;
pub use runtime::InMemoryBackend;
pub use runtime::Invocation;
pub use runtime::MemoryEventSink;
pub use runtime::ModuleCatalog;
pub use runtime::ModuleIndex;
pub use runtime::NoopEventSink;
pub use runtime::PassthroughExtractor;
pub use runtime::RekeyByField;
pub use runtime::ResolutionFailure;
pub use runtime::RunEvent;
pub use runtime::RunEventSink;
pub use runtime::RunReport;
pub use runtime::SetupError;
pub use runtime::SkippedRecord;
pub use runtime::SpecReport;
pub use runtime::StderrEventSink;
pub use runtime::TestClass;
pub use runtime::TestModule;
pub use runtime::TestSpec;
pub use runtime::UsageError;
pub use runtime::Verdict;
pub use runtime::generate_cases;
