//! Observability: in-memory counters for expectation activity and the sink
//! abstraction every instrumentation point goes through.
//!
//! The expectation engine emits `MockEvent`s only; it never touches
//! `obs::metrics` directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, EventState, OpCounters, TableCounters};
pub use sink::{EventSink, MockEvent, OpKind, event_report, events_reset_all, with_event_sink};
