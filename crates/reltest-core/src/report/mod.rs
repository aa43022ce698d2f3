//! Failure sinks: the two severities the engine reports through.
//!
//! `fail` marks the running test failed and lets the caller keep checking.
//! `abort` stops the running test at the point of the call.

use std::cell::RefCell;

///
/// FailureSink
///

pub trait FailureSink {
    /// Soft failure; execution continues.
    fn fail(&self, message: &str);

    /// Fatal failure; never returns.
    fn abort(&self, message: &str) -> !;
}

///
/// PanicSink
///
/// Default sink for plain `#[test]` functions: both severities panic.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn fail(&self, message: &str) {
        panic!("{message}");
    }

    fn abort(&self, message: &str) -> ! {
        panic!("{message}");
    }
}

///
/// RecordingSink
///
/// Collects soft failures so one teardown can report all of them.
/// `abort` records the message and then panics.
///

#[derive(Debug, Default)]
pub struct RecordingSink {
    failures: RefCell<Vec<String>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    /// Drain collected failures, leaving the sink clean.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.failures.borrow_mut())
    }
}

impl FailureSink for RecordingSink {
    fn fail(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
    }

    fn abort(&self, message: &str) -> ! {
        self.failures.borrow_mut().push(message.to_string());
        panic!("{message}");
    }
}
