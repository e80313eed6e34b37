// crates/netcheck-core/src/runtime/runner.rs
// ============================================================================
// Module: Netcheck Bundle Runner
// Description: End-to-end execution of resolved specs.
// Purpose: Run each spec once, evaluate its cases, and collect a run report.
// Dependencies: crate::{core, interfaces, runtime}, serde
// ============================================================================

//! ## Overview
//! The runner owns one [`ExecutionContext`] per spec. A spec with no
//! `test_data` or no assertion templates produces no cases and never reaches
//! the backend. Context errors are recorded on the spec's report and do not
//! affect other specs; resolution errors are recorded per bundle record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;

use crate::core::BundleRecord;
use crate::interfaces::Backend;
use crate::runtime::cases::SkippedRecord;
use crate::runtime::cases::generate_cases;
use crate::runtime::context::ExecutionContext;
use crate::runtime::evaluator::CaseReport;
use crate::runtime::evaluator::Evaluator;
use crate::runtime::events::NoopEventSink;
use crate::runtime::events::RunEvent;
use crate::runtime::events::RunEventSink;
use crate::runtime::loader::BundleLoader;
use crate::runtime::loader::TestSpec;

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Report for one spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecReport {
    /// Display name (`Class` or `Class - label`).
    pub name: String,
    /// Resolved module location.
    pub module: String,
    /// Evaluated cases in generation order.
    pub cases: Vec<CaseReport>,
    /// Record/template pairs that produced no case.
    pub skipped: Vec<SkippedRecord>,
    /// Context error that prevented evaluation, if any.
    pub error: Option<String>,
}

impl SpecReport {
    /// Returns true when the spec ran and every case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.cases.iter().all(|case| case.verdict.passed())
    }
}

/// A bundle record that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionFailure {
    /// Zero-based record position.
    pub position: usize,
    /// Requested test class.
    pub class: String,
    /// Rendered resolution error.
    pub error: String,
}

/// Report for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Spec reports in bundle order.
    pub specs: Vec<SpecReport>,
    /// Records that failed to resolve.
    pub resolution_errors: Vec<ResolutionFailure>,
}

impl RunReport {
    /// Returns true when every record resolved and every spec passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.resolution_errors.is_empty() && self.specs.iter().all(SpecReport::passed)
    }

    /// Returns the number of evaluated cases.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.specs.iter().map(|spec| spec.cases.len()).sum()
    }

    /// Returns the number of cases that did not pass.
    #[must_use]
    pub fn failed_case_count(&self) -> usize {
        self.specs
            .iter()
            .flat_map(|spec| &spec.cases)
            .filter(|case| !case.verdict.passed())
            .count()
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs resolved specs against one backend.
#[derive(Clone)]
pub struct BundleRunner {
    /// Backend shared by every context.
    backend: Arc<dyn Backend>,
    /// Event destination.
    events: Arc<dyn RunEventSink>,
}

impl BundleRunner {
    /// Creates a runner with a no-op event sink.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn RunEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Runs one spec.
    #[must_use]
    pub fn run_spec(&self, spec: TestSpec) -> SpecReport {
        let mut report = SpecReport {
            name: spec.display_name(),
            module: spec.module.to_string(),
            cases: Vec::new(),
            skipped: Vec::new(),
            error: None,
        };
        if spec.test_data.is_empty() || spec.definition().cases().is_empty() {
            return report;
        }
        let mut context = ExecutionContext::new(spec);
        context.attach_backend(Arc::clone(&self.backend));
        context.attach_event_sink(Arc::clone(&self.events));
        match context.transformed_result() {
            Ok(transformed) => {
                let generated = generate_cases(context.spec(), &transformed);
                report.cases =
                    Evaluator::new(Arc::clone(&self.events)).evaluate_all(&generated.cases);
                report.skipped = generated.skipped;
            }
            Err(err) => report.error = Some(err.to_string()),
        }
        report
    }

    /// Runs specs in order.
    #[must_use]
    pub fn run(&self, specs: Vec<TestSpec>) -> RunReport {
        RunReport {
            specs: specs.into_iter().map(|spec| self.run_spec(spec)).collect(),
            resolution_errors: Vec::new(),
        }
    }

    /// Resolves and runs bundle records; unresolved records are reported.
    #[must_use]
    pub fn run_bundle(&self, loader: &BundleLoader<'_>, records: &[BundleRecord]) -> RunReport {
        let mut report = RunReport::default();
        for (position, (record, resolved)) in records.iter().zip(loader.load(records)).enumerate() {
            match resolved {
                Ok(spec) => {
                    self.events.record(&RunEvent::bundle_loaded(
                        spec.display_name(),
                        spec.module.to_string(),
                        spec.test_data.len(),
                    ));
                    report.specs.push(self.run_spec(spec));
                }
                Err(err) => {
                    self.events.record(&RunEvent::resolution_failed(
                        position,
                        record.test_class.to_string(),
                        err.to_string(),
                    ));
                    report.resolution_errors.push(ResolutionFailure {
                        position,
                        class: record.test_class.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }
}
