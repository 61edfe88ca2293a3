//! Metrics sink boundary.
//!
//! Core logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between predicate logic
//! and the thread-local metrics state.
use crate::obs::metrics;
use derive_more::Display;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// PredicateKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum PredicateKind {
    Equal,
    Like,
    In,
    IsNull,
    IsNotNull,
    Range,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    PredicateBuilt { kind: PredicateKind },
    PathResolved { depth: usize },
    ResolveFailed,
    Evaluated { matched: bool },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PredicateBuilt { kind } => metrics::with_state_mut(|m| {
                m.ops.predicates_built = m.ops.predicates_built.saturating_add(1);
                let entry = m.kinds.entry(kind.to_string()).or_default();
                *entry = entry.saturating_add(1);
            }),

            MetricsEvent::PathResolved { depth } => metrics::with_state_mut(|m| {
                let depth = u64::try_from(depth).unwrap_or(u64::MAX);
                m.ops.paths_resolved = m.ops.paths_resolved.saturating_add(1);
                m.ops.segments_walked = m.ops.segments_walked.saturating_add(depth);
            }),

            MetricsEvent::ResolveFailed => metrics::with_state_mut(|m| {
                m.ops.resolve_failures = m.ops.resolve_failures.saturating_add(1);
            }),

            MetricsEvent::Evaluated { matched } => metrics::with_state_mut(|m| {
                m.ops.rows_evaluated = m.ops.rows_evaluated.saturating_add(1);
                if matched {
                    m.ops.rows_matched = m.ops.rows_matched.saturating_add(1);
                }
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - We materialize only a shared reference (`&dyn MetricsSink`), matching the
        //   original shared borrow used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any async/deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink<'a> {
        calls: &'a AtomicUsize,
    }

    impl MetricsSink for CountingSink<'_> {
        fn record(&self, _: MetricsEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer_calls = AtomicUsize::new(0);
        let inner_calls = AtomicUsize::new(0);
        let outer = CountingSink {
            calls: &outer_calls,
        };
        let inner = CountingSink {
            calls: &inner_calls,
        };

        // No override installed yet.
        record(MetricsEvent::ResolveFailed);
        assert_eq!(outer_calls.load(Ordering::SeqCst), 0);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 0);

        with_metrics_sink(&outer, || {
            record(MetricsEvent::PathResolved { depth: 1 });
            assert_eq!(outer_calls.load(Ordering::SeqCst), 1);
            assert_eq!(inner_calls.load(Ordering::SeqCst), 0);

            with_metrics_sink(&inner, || {
                record(MetricsEvent::PathResolved { depth: 2 });
            });

            // Inner override was restored to outer override.
            record(MetricsEvent::ResolveFailed);
        });

        assert_eq!(outer_calls.load(Ordering::SeqCst), 2);
        assert_eq!(inner_calls.load(Ordering::SeqCst), 1);

        // Outer override was restored to previous (none).
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let calls = AtomicUsize::new(0);
        let sink = CountingSink { calls: &calls };

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(&sink, || {
                record(MetricsEvent::ResolveFailed);
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Guard restored TLS slot after unwind.
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn global_sink_accumulates_counters() {
        metrics_reset_all();

        record(MetricsEvent::PredicateBuilt {
            kind: PredicateKind::Equal,
        });
        record(MetricsEvent::PredicateBuilt {
            kind: PredicateKind::Equal,
        });
        record(MetricsEvent::PathResolved { depth: 3 });
        record(MetricsEvent::ResolveFailed);
        record(MetricsEvent::Evaluated { matched: true });
        record(MetricsEvent::Evaluated { matched: false });

        let report = metrics_report();
        assert_eq!(report.ops.predicates_built, 2);
        assert_eq!(report.kinds.get("Equal"), Some(&2));
        assert_eq!(report.ops.paths_resolved, 1);
        assert_eq!(report.ops.segments_walked, 3);
        assert_eq!(report.ops.resolve_failures, 1);
        assert_eq!(report.ops.rows_evaluated, 2);
        assert_eq!(report.ops.rows_matched, 1);

        metrics_reset_all();
        assert_eq!(metrics_report(), metrics::EventReport::default());
    }
}
