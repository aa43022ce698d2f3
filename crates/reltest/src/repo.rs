use reltest_core::{
    config::MockConfig,
    context::CallContext,
    error::Error,
    expect::{DeleteExpectations, MockDelete},
    modifier::Modifier,
    report::{FailureSink, PanicSink, RecordingSink},
    traits::Record,
};
use std::{
    cell::{RefCell, RefMut},
    fmt,
    rc::Rc,
};

///
/// Repository
///
/// Data-access seam the code under test depends on.
///

pub trait Repository {
    fn delete(
        &self,
        context: &CallContext,
        record: &dyn Record,
        modifiers: &[Modifier],
    ) -> Result<(), Error>;
}

///
/// MockRepository
///
/// Test double for `Repository`. Owns one expectation set per mocked
/// operation and is owned by a single test; it is not `Sync`.
///
/// Builders returned by `expect_*` borrow the repository's expectation set
/// and must be dropped before the code under test runs. Chaining the whole
/// declaration in one statement does that.
///
/// Unmatched calls abort through `sink`, a `PanicSink` unless replaced
/// with `with_sink`.
///

pub struct MockRepository {
    context: CallContext,
    delete: RefCell<DeleteExpectations>,
    sink: Rc<dyn FailureSink>,
}

impl MockRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &MockConfig) -> Self {
        Self {
            delete: RefCell::new(DeleteExpectations::with_config(config)),
            ..Self::default()
        }
    }

    /// Route fatal failures raised by calls on this repository to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Rc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Context new declarations are attributed to.
    #[must_use]
    pub const fn context(&self) -> CallContext {
        self.context
    }

    ///
    /// DECLARATION
    ///

    /// Declare one expected delete call.
    pub fn expect_delete(&self, modifiers: &[Modifier]) -> RefMut<'_, MockDelete> {
        self.expect_delete_in(self.context, modifiers)
    }

    /// Declare one expected delete call attributed to `context`.
    pub fn expect_delete_in(
        &self,
        context: CallContext,
        modifiers: &[Modifier],
    ) -> RefMut<'_, MockDelete> {
        RefMut::map(self.delete.borrow_mut(), |set| {
            set.register(context, modifiers)
        })
    }

    ///
    /// VERIFICATION
    ///

    /// Verify every declared expectation, reporting each unmet one on `sink`.
    pub fn assert(&self, sink: &dyn FailureSink) -> bool {
        self.delete.borrow_mut().assert(sink)
    }

    /// Verify every declared expectation and panic once with all unmet ones.
    pub fn assert_expectations(&self) {
        let sink = RecordingSink::new();
        if !self.assert(&sink) {
            panic!("{}", sink.take().join("\n\n"));
        }
    }

    /// Number of declarations still held (cleared after a passing verify).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.delete.borrow().len()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self {
            context: CallContext::root(),
            delete: RefCell::default(),
            sink: Rc::new(PanicSink),
        }
    }
}

impl fmt::Debug for MockRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRepository")
            .field("context", &self.context)
            .field("delete", &self.delete)
            .finish_non_exhaustive()
    }
}

impl Repository for MockRepository {
    fn delete(
        &self,
        context: &CallContext,
        record: &dyn Record,
        modifiers: &[Modifier],
    ) -> Result<(), Error> {
        self.delete
            .borrow_mut()
            .execute(context, record, modifiers, self.sink.as_ref())
    }
}
