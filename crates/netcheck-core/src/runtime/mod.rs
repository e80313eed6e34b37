// crates/netcheck-core/src/runtime/mod.rs
// ============================================================================
// Module: Netcheck Runtime
// Description: Resolution, execution, extraction, and evaluation pipeline.
// Purpose: Turn bundle records into evaluated assertions.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime wires the pipeline stages together:
//! [`ModuleIndex`] and [`ModuleCatalog`] feed the [`BundleLoader`], each
//! resolved [`TestSpec`] gets an [`ExecutionContext`], and the
//! [`BundleRunner`] generates and evaluates cases from the transformed result.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod backend;
pub mod cases;
pub mod catalog;
pub mod context;
pub mod evaluator;
pub mod events;
pub mod extract;
pub mod index;
pub mod loader;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use backend::BackendFixture;
pub use backend::InMemoryBackend;
pub use backend::Invocation;
pub use cases::GeneratedCases;
pub use cases::SkippedRecord;
pub use cases::generate_cases;
pub use catalog::CaseCheck;
pub use catalog::CaseTemplate;
pub use catalog::CatalogError;
pub use catalog::ModuleCatalog;
pub use catalog::TestClass;
pub use catalog::TestModule;
pub use context::ContextError;
pub use context::ExecutionContext;
pub use context::SetupError;
pub use evaluator::CaseReport;
pub use evaluator::ERROR_SENTINEL;
pub use evaluator::Evaluator;
pub use evaluator::Verdict;
pub use events::FileEventSink;
pub use events::MemoryEventSink;
pub use events::NoopEventSink;
pub use events::RunEvent;
pub use events::RunEventSink;
pub use events::StderrEventSink;
pub use extract::FnExtractor;
pub use extract::IdentityExtractor;
pub use extract::PassthroughExtractor;
pub use extract::RekeyByField;
pub use index::ModuleIndex;
pub use loader::BundleLoader;
pub use loader::TestSpec;
pub use loader::UsageError;
pub use runner::BundleRunner;
pub use runner::ResolutionFailure;
pub use runner::RunReport;
pub use runner::SpecReport;
