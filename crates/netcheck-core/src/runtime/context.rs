// crates/netcheck-core/src/runtime/context.rs
// ============================================================================
// Module: Netcheck Execution Context
// Description: Per-spec holder of the backend call and its cached results.
// Purpose: Run each remote operation exactly once and share its result.
// Dependencies: crate::{core, interfaces, runtime}, thiserror
// ============================================================================

//! ## Overview
//! An [`ExecutionContext`] is created for one [`TestSpec`]. The first request
//! for the aggregated result invokes the backend; later requests, including
//! concurrent ones, share the cached answer. The transformed result is cached
//! the same way, so the extractor runs at most once per context.
//!
//! # Invariants
//! - Each cache slot is checked and filled while its mutex is held.
//! - Lock order is transformed slot, then aggregated slot.
//! - Errors are returned, never cached; a later call retries the computation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use thiserror::Error;

use crate::core::AggregatedResult;
use crate::core::TransformedResult;
use crate::interfaces::Backend;
use crate::interfaces::BackendError;
use crate::interfaces::ExtractError;
use crate::interfaces::Operation;
use crate::runtime::events::NoopEventSink;
use crate::runtime::events::RunEvent;
use crate::runtime::events::RunEventSink;
use crate::runtime::loader::TestSpec;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Setup errors raised before any backend call.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// No backend was attached to the context.
    #[error("no backend attached to execution context for {class}")]
    NoBackend {
        /// Test class of the context.
        class: String,
    },
}

/// Errors raised while producing context results.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Context is not usable.
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// Backend failed at setup level.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Extractor rejected the aggregated result.
    #[error("result extraction failed: {0}")]
    Extract(#[from] ExtractError),
    /// A cache mutex was poisoned by a panicking reader.
    #[error("execution context cache poisoned: {0}")]
    CachePoisoned(&'static str),
}

// ============================================================================
// SECTION: Cache Slots
// ============================================================================

/// Lazily computed, shared value.
#[derive(Debug)]
enum CacheSlot<T> {
    /// Not computed yet.
    Uncomputed,
    /// Computed and shared.
    Computed(Arc<T>),
}

impl<T> CacheSlot<T> {
    /// Returns the cached value, if computed.
    fn get(&self) -> Option<Arc<T>> {
        match self {
            Self::Uncomputed => None,
            Self::Computed(value) => Some(Arc::clone(value)),
        }
    }
}

// ============================================================================
// SECTION: Execution Context
// ============================================================================

/// Per-spec execution state.
pub struct ExecutionContext {
    /// Spec the context executes.
    spec: TestSpec,
    /// Backend used for the single remote call.
    backend: Option<Arc<dyn Backend>>,
    /// Event destination.
    events: Arc<dyn RunEventSink>,
    /// Cached backend answer.
    aggregated: Mutex<CacheSlot<AggregatedResult>>,
    /// Cached extractor output.
    transformed: Mutex<CacheSlot<TransformedResult>>,
}

impl ExecutionContext {
    /// Creates a context with no backend and a no-op event sink.
    #[must_use]
    pub fn new(spec: TestSpec) -> Self {
        Self {
            spec,
            backend: None,
            events: Arc::new(NoopEventSink),
            aggregated: Mutex::new(CacheSlot::Uncomputed),
            transformed: Mutex::new(CacheSlot::Uncomputed),
        }
    }

    /// Attaches the backend used for the remote call.
    pub fn attach_backend(&mut self, backend: Arc<dyn Backend>) {
        self.backend = Some(backend);
    }

    /// Builder form of [`Self::attach_backend`].
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.attach_backend(backend);
        self
    }

    /// Attaches an event sink.
    pub fn attach_event_sink(&mut self, events: Arc<dyn RunEventSink>) {
        self.events = events;
    }

    /// Returns the spec.
    #[must_use]
    pub const fn spec(&self) -> &TestSpec {
        &self.spec
    }

    /// Builds the remote operation from the spec.
    #[must_use]
    pub fn build_operation(&self) -> Operation {
        let builder = self.spec.definition().operation();
        Operation {
            task: builder.task(&self.spec),
            arguments: builder.arguments(&self.spec),
            host_filter: builder.host_filter(&self.spec),
        }
    }

    /// Returns the backend answer, invoking the backend on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Setup`] when no backend is attached,
    /// [`ContextError::Backend`] when the backend fails at setup level, and
    /// [`ContextError::CachePoisoned`] when the cache mutex is poisoned.
    pub fn aggregated_result(&self) -> Result<Arc<AggregatedResult>, ContextError> {
        let mut slot =
            self.aggregated.lock().map_err(|_| ContextError::CachePoisoned("aggregated"))?;
        if let Some(cached) = slot.get() {
            return Ok(cached);
        }
        let backend = self.backend.as_ref().ok_or_else(|| SetupError::NoBackend {
            class: self.spec.class_name.to_string(),
        })?;
        let operation = self.build_operation();
        let result = backend.run(
            &operation.task,
            &operation.arguments,
            operation.host_filter.as_ref(),
        )?;
        self.events.record(&RunEvent::backend_invoked(
            self.spec.display_name(),
            operation.task.to_string(),
            result.len(),
            result.failed_hosts().count(),
        ));
        let shared = Arc::new(result);
        *slot = CacheSlot::Computed(Arc::clone(&shared));
        Ok(shared)
    }

    /// Returns the extractor output, computing it on first use.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::aggregated_result`], or
    /// [`ContextError::Extract`] when the extractor rejects the answer.
    pub fn transformed_result(&self) -> Result<Arc<TransformedResult>, ContextError> {
        let mut slot =
            self.transformed.lock().map_err(|_| ContextError::CachePoisoned("transformed"))?;
        if let Some(cached) = slot.get() {
            return Ok(cached);
        }
        let aggregated = self.aggregated_result()?;
        let transformed = self.spec.definition().extractor().transform(&aggregated)?;
        let shared = Arc::new(transformed);
        *slot = CacheSlot::Computed(Arc::clone(&shared));
        Ok(shared)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::CacheSlot;

    #[test]
    fn uncomputed_slot_is_empty() {
        let slot: CacheSlot<u8> = CacheSlot::Uncomputed;
        assert!(slot.get().is_none());
    }

    #[test]
    fn computed_slot_shares_value() {
        let slot = CacheSlot::Computed(std::sync::Arc::new(7_u8));
        let first = slot.get();
        let second = slot.get();
        assert!(matches!((first, second), (Some(a), Some(b)) if std::sync::Arc::ptr_eq(&a, &b)));
    }
}
