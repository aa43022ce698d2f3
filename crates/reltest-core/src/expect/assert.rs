use crate::{context::CallContext, error::ExpectationError, report::FailureSink};
use std::fmt;

///
/// Repeat
///
/// Remaining-budget policy for one expectation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Repeat {
    /// Satisfies exactly `n` calls; verify requires all `n`.
    Times(u32),
    /// No budget; verify requires at least one call.
    Unlimited,
}

///
/// Assertion
///
/// Call-tracking state embedded in every expectation.
/// `calls` is the only field mutated while matching.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assertion {
    context: CallContext,
    repeat: Repeat,
    optional: bool,
    calls: u32,
    last_context: Option<CallContext>,
}

impl Assertion {
    pub(crate) const fn new(context: CallContext) -> Self {
        Self {
            context,
            repeat: Repeat::Times(1),
            optional: false,
            calls: 0,
            last_context: None,
        }
    }

    ///
    /// CONFIGURATION
    ///

    pub const fn once(&mut self) -> &mut Self {
        self.times(1)
    }

    pub const fn twice(&mut self) -> &mut Self {
        self.times(2)
    }

    /// `times(0)` declares a call that must never be consumed.
    pub const fn times(&mut self, n: u32) -> &mut Self {
        self.repeat = Repeat::Times(n);
        self
    }

    pub const fn unlimited(&mut self) -> &mut Self {
        self.repeat = Repeat::Unlimited;
        self
    }

    /// Verify passes regardless of how many calls were consumed.
    pub const fn maybe(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    ///
    /// INSPECTION
    ///

    #[must_use]
    pub const fn calls(&self) -> u32 {
        self.calls
    }

    #[must_use]
    pub const fn repeat(&self) -> Repeat {
        self.repeat
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Context the expectation was declared in.
    #[must_use]
    pub const fn context(&self) -> CallContext {
        self.context
    }

    /// Context of the most recent accepted call.
    #[must_use]
    pub const fn last_context(&self) -> Option<CallContext> {
        self.last_context
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        match self.repeat {
            Repeat::Times(n) => self.calls >= n,
            Repeat::Unlimited => false,
        }
    }

    ///
    /// BOOKKEEPING
    ///

    /// Consume one unit of budget. Returns false without touching state
    /// when the budget is already spent.
    pub(crate) const fn accept(&mut self, context: &CallContext) -> bool {
        if self.is_exhausted() {
            return false;
        }

        self.calls = self.calls.saturating_add(1);
        self.last_context = Some(*context);

        true
    }

    /// Check the budget was met without reporting anything.
    pub(crate) fn check(&self, owner: &dyn fmt::Display) -> Result<(), ExpectationError> {
        let met = self.optional
            || match self.repeat {
                Repeat::Times(n) => self.calls >= n,
                Repeat::Unlimited => self.calls > 0,
            };
        if met {
            return Ok(());
        }

        let expectation = owner.to_string();
        match self.repeat {
            Repeat::Times(expected) if self.calls > 0 => Err(ExpectationError::CalledTooFew {
                expectation,
                calls: self.calls,
                expected,
            }),
            _ => Err(ExpectationError::NotCalled { expectation }),
        }
    }

    /// Report an unmet budget as a soft failure on `sink`.
    pub(crate) fn verify(&self, sink: &dyn FailureSink, owner: &dyn fmt::Display) -> bool {
        match self.check(owner) {
            Ok(()) => true,
            Err(err) => {
                sink.fail(&err.to_string());
                false
            }
        }
    }
}
