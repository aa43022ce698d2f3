//! Event sink boundary.
//!
//! Expectation logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MockEvent and EventSink.
use crate::obs::metrics::{self, EventReport};
use std::{cell::RefCell, fmt, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// OpKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str("delete"),
        }
    }
}

///
/// MockEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MockEvent<'a> {
    Register {
        kind: OpKind,
    },
    Match {
        kind: OpKind,
        table: &'a str,
        index: usize,
    },
    Miss {
        kind: OpKind,
        table: &'a str,
    },
    Verify {
        kind: OpKind,
        checked: u64,
        unmet: u64,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &MockEvent<'_>);
}

/// GlobalEventSink
/// Default process-local sink that writes into thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: &MockEvent<'_>) {
        match *event {
            MockEvent::Register { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.registered = m.ops.registered.saturating_add(1);
                });
            }

            MockEvent::Match { table, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.matched = m.ops.matched.saturating_add(1);
                    let entry = m.tables.entry(table.to_string()).or_default();
                    entry.matched = entry.matched.saturating_add(1);
                });
            }

            MockEvent::Miss { table, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.unmatched = m.ops.unmatched.saturating_add(1);
                    let entry = m.tables.entry(table.to_string()).or_default();
                    entry.unmatched = entry.unmatched.saturating_add(1);
                });
            }

            MockEvent::Verify { checked, unmet, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.verified = m.ops.verified.saturating_add(checked);
                    m.ops.unmet = m.ops.unmet.saturating_add(unmet);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_EVENT_SINK: GlobalEventSink = GlobalEventSink;

pub(crate) fn record(event: &MockEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_EVENT_SINK.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn event_report() -> EventReport {
    metrics::report()
}

/// Reset all counters on the current thread.
pub fn events_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary event sink override.
/// The previous sink is restored on every exit, including unwind.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        seen: RefCell<Vec<String>>,
    }

    impl EventSink for CountingSink {
        fn record(&self, event: &MockEvent<'_>) {
            self.seen.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn global_sink_aggregates_per_table() {
        events_reset_all();

        record(&MockEvent::Register {
            kind: OpKind::Delete,
        });
        record(&MockEvent::Match {
            kind: OpKind::Delete,
            table: "points",
            index: 0,
        });
        record(&MockEvent::Miss {
            kind: OpKind::Delete,
            table: "points",
        });
        record(&MockEvent::Verify {
            kind: OpKind::Delete,
            checked: 2,
            unmet: 1,
        });

        let report = event_report();
        assert_eq!(report.ops.registered, 1);
        assert_eq!(report.ops.matched, 1);
        assert_eq!(report.ops.unmatched, 1);
        assert_eq!(report.ops.verified, 2);
        assert_eq!(report.ops.unmet, 1);
        assert_eq!(report.tables["points"].matched, 1);
        assert_eq!(report.tables["points"].unmatched, 1);

        events_reset_all();
        assert_eq!(event_report(), EventReport::default());
    }

    #[test]
    fn override_captures_events_and_restores() {
        events_reset_all();
        let sink = Rc::new(CountingSink::default());

        with_event_sink(sink.clone(), || {
            record(&MockEvent::Register {
                kind: OpKind::Delete,
            });
        });
        record(&MockEvent::Register {
            kind: OpKind::Delete,
        });

        assert_eq!(sink.seen.borrow().len(), 1);
        assert_eq!(event_report().ops.registered, 1);
    }

    #[test]
    fn report_serializes_to_json() {
        events_reset_all();
        record(&MockEvent::Miss {
            kind: OpKind::Delete,
            table: "scores",
        });

        let json = serde_json::to_value(event_report()).unwrap();
        assert_eq!(json["ops"]["unmatched"], 1);
        assert_eq!(json["tables"]["scores"]["unmatched"], 1);
    }
}
