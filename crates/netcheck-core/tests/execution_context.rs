// crates/netcheck-core/tests/execution_context.rs
// ============================================================================
// Module: Execution Context Tests
// Description: Exactly-once backend calls, caching, and setup errors.
// Purpose: Validate per-spec execution state under sequential and concurrent use.
// ============================================================================

//! Execution context tests.

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

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Barrier;
use std::sync::Mutex;
use std::thread;

use netcheck_core::AggregatedResult;
use netcheck_core::Arguments;
use netcheck_core::AttemptOutcome;
use netcheck_core::Backend;
use netcheck_core::BackendError;
use netcheck_core::BundleRecord;
use netcheck_core::ContextError;
use netcheck_core::ExecutionContext;
use netcheck_core::FnExtractor;
use netcheck_core::HostFilter;
use netcheck_core::HostName;
use netcheck_core::InMemoryBackend;
use netcheck_core::ModulePath;
use netcheck_core::OperationBuilder;
use netcheck_core::PassthroughExtractor;
use netcheck_core::SetupError;
use netcheck_core::TaskId;
use netcheck_core::TestClass;
use netcheck_core::TestSpec;
use netcheck_core::runtime::extract::primary_success;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Operation that targets `napalm_get` with the spec's execution parameters.
struct NapalmGet;

impl OperationBuilder for NapalmGet {
    fn task(&self, _spec: &TestSpec) -> TaskId {
        TaskId::new("napalm_get")
    }
}

/// Operation restricted to the hosts listed in `test_data`.
struct FilteredGet;

impl OperationBuilder for FilteredGet {
    fn task(&self, _spec: &TestSpec) -> TaskId {
        TaskId::new("napalm_get")
    }

    fn arguments(&self, spec: &TestSpec) -> Arguments {
        let mut arguments = spec.test_execution.clone();
        arguments.insert("getters".to_string(), json!(["users"]));
        arguments
    }

    fn host_filter(&self, spec: &TestSpec) -> Option<HostFilter> {
        Some(HostFilter::names(
            spec.test_data
                .iter()
                .filter_map(|record| record.get("host").and_then(|host| host.as_str()))
                .map(HostName::new),
        ))
    }
}

fn spec_for(class: TestClass, record: &BundleRecord) -> TestSpec {
    TestSpec::new(ModulePath::new("tests.context"), record, Arc::new(class))
}

fn users_backend() -> InMemoryBackend {
    InMemoryBackend::new(["R1", "R2", "R3"])
        .with_response(
            "napalm_get",
            "R1",
            vec![AttemptOutcome::Success(json!({"arya": {"level": 11}}))],
        )
        .with_response(
            "napalm_get",
            "R2",
            vec![AttemptOutcome::Success(json!({"jon": {"level": 5}}))],
        )
        .with_response("napalm_get", "R3", vec![AttemptOutcome::failure("timeout", "no answer")])
}

/// Backend failing on its first call and answering afterwards.
struct FlakyBackend {
    calls: Mutex<usize>,
}

impl Backend for FlakyBackend {
    fn run(
        &self,
        task: &TaskId,
        _arguments: &Arguments,
        _host_filter: Option<&HostFilter>,
    ) -> Result<AggregatedResult, BackendError> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls == 1 {
            return Err(BackendError::Setup("inventory not loaded".to_string()));
        }
        Ok(AggregatedResult::new(task.clone())
            .with_host("R1", vec![AttemptOutcome::Success(json!({}))]))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn aggregated_result_invokes_backend_once() {
    let backend = Arc::new(users_backend());
    let record = BundleRecord::new("TestUsers");
    let context = ExecutionContext::new(spec_for(TestClass::new("TestUsers", NapalmGet), &record))
        .with_backend(backend.clone());

    let first = context.aggregated_result().unwrap();
    for _ in 0 .. 5 {
        let again = context.aggregated_result().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
    assert_eq!(backend.invocation_count(), 1);
    assert_eq!(first.len(), 3);
}

#[test]
fn concurrent_readers_share_one_backend_call() {
    let backend = Arc::new(users_backend());
    let record = BundleRecord::new("TestUsers");
    let class = TestClass::new("TestUsers", NapalmGet).with_extractor(PassthroughExtractor);
    let context = ExecutionContext::new(spec_for(class, &record)).with_backend(backend.clone());
    let readers = 8;
    let barrier = Barrier::new(readers);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0 .. readers)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    context.transformed_result().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(backend.invocation_count(), 1);
    assert!(results.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn missing_backend_is_setup_error() {
    let record = BundleRecord::new("TestUsers");
    let context = ExecutionContext::new(spec_for(TestClass::new("TestUsers", NapalmGet), &record));
    let err = context.aggregated_result().unwrap_err();
    assert!(matches!(
        &err,
        ContextError::Setup(SetupError::NoBackend { class }) if class == "TestUsers"
    ));
    assert!(err.to_string().contains("no backend attached"));
    assert!(err.to_string().contains("TestUsers"));
}

#[test]
fn operation_carries_arguments_and_host_filter() {
    let backend = Arc::new(users_backend());
    let mut execution = serde_json::Map::new();
    execution.insert("retries".to_string(), json!(0));
    let record = BundleRecord::new("TestUsers")
        .with_test_data(vec![json!({"host": "R2"}).as_object().unwrap().clone()])
        .with_test_execution(execution);
    let context = ExecutionContext::new(spec_for(TestClass::new("TestUsers", FilteredGet), &record))
        .with_backend(backend.clone());

    let result = context.aggregated_result().unwrap();
    assert_eq!(result.hosts.keys().map(HostName::as_str).collect::<Vec<_>>(), vec!["R2"]);

    let calls = backend.invocations();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].arguments.get("retries"), Some(&json!(0)));
    assert_eq!(calls[0].arguments.get("getters"), Some(&json!(["users"])));
}

#[test]
fn default_operation_uses_test_execution_and_full_inventory() {
    let mut execution = serde_json::Map::new();
    execution.insert("count".to_string(), json!(3));
    let record = BundleRecord::new("TestUsers").with_test_execution(execution.clone());
    let context = ExecutionContext::new(spec_for(TestClass::new("TestUsers", NapalmGet), &record));
    let operation = context.build_operation();
    assert_eq!(operation.task.as_str(), "napalm_get");
    assert_eq!(operation.arguments, execution);
    assert!(operation.host_filter.is_none());
}

#[test]
fn backend_errors_are_not_cached() {
    let backend = Arc::new(FlakyBackend {
        calls: Mutex::new(0),
    });
    let record = BundleRecord::new("TestUsers");
    let context = ExecutionContext::new(spec_for(TestClass::new("TestUsers", NapalmGet), &record))
        .with_backend(backend.clone());

    assert!(matches!(context.aggregated_result(), Err(ContextError::Backend(_))));
    assert!(context.aggregated_result().is_ok());
    assert!(context.aggregated_result().is_ok());
    assert_eq!(*backend.calls.lock().unwrap(), 2);
}

#[test]
fn passthrough_preserves_failed_hosts() {
    let record = BundleRecord::new("TestUsers");
    let context = ExecutionContext::new(spec_for(
        TestClass::new("TestUsers", NapalmGet).with_extractor(PassthroughExtractor),
        &record,
    ))
    .with_backend(Arc::new(users_backend()));

    let transformed = context.transformed_result().unwrap();
    let failed = transformed.host("R3").unwrap();
    assert!(failed.failed());
    assert_eq!(failed.error().map(|detail| detail.kind.as_str()), Some("timeout"));
    assert_eq!(transformed.lookup("R1", &["arya", "level"]), Some(&json!(11)));
}

#[test]
fn transform_runs_once_per_host() {
    let counts: Arc<Mutex<BTreeMap<String, usize>>> = Arc::default();
    let seen = Arc::clone(&counts);
    let extractor = FnExtractor::new(move |host: &HostName, outcomes: &[AttemptOutcome]| {
        *seen.lock().unwrap().entry(host.to_string()).or_default() += 1;
        primary_success(host, outcomes).cloned()
    });
    let record = BundleRecord::new("TestUsers");
    let context = ExecutionContext::new(spec_for(
        TestClass::new("TestUsers", NapalmGet).with_extractor(extractor),
        &record,
    ))
    .with_backend(Arc::new(users_backend()));

    let first = context.transformed_result().unwrap();
    let second = context.transformed_result().unwrap();
    assert_eq!(*first, *second);

    let counts = counts.lock().unwrap();
    assert_eq!(counts.get("R1"), Some(&1));
    assert_eq!(counts.get("R2"), Some(&1));
    // R3 failed and passes through without the per-host transform.
    assert_eq!(counts.get("R3"), None);
}
