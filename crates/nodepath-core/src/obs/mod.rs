//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Predicate construction and resolution report through `sink::record`;
//! nothing else in the crate touches metrics state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, PredicateKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
