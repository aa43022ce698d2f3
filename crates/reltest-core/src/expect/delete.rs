use crate::{
    config::{DiagnosticsConfig, MockConfig},
    context::CallContext,
    error::Error,
    expect::{assert::Assertion, format},
    modifier::{Modifier, Modifiers},
    obs::sink::{self as events, MockEvent, OpKind},
    report::FailureSink,
    traits::{PartialRecord, Record, RecordSnapshot, normalize_type_name, type_name_matches},
};
use std::fmt;

///
/// MockDelete
///
/// One declared delete call: record constraints, expected modifiers,
/// the programmed result, and the embedded call-tracking state.
///
/// Every set constraint is enforced (AND); display shows only the first
/// set one in the order record, contains, type, table.
///

#[derive(Clone, Debug)]
pub struct MockDelete {
    pub(crate) assertion: Assertion,
    pub(crate) target_record: Option<RecordSnapshot>,
    pub(crate) target_type: Option<String>,
    pub(crate) target_table: Option<String>,
    pub(crate) target_contains: Option<PartialRecord>,
    pub(crate) modifiers: Modifiers,
    pub(crate) result: Option<Error>,
}

impl MockDelete {
    const fn new(context: CallContext, modifiers: Modifiers) -> Self {
        Self {
            assertion: Assertion::new(context),
            target_record: None,
            target_type: None,
            target_table: None,
            target_contains: None,
            modifiers,
            result: None,
        }
    }

    // Shape of a call nobody declared, used only for diagnostics.
    fn unregistered(context: CallContext, record: &dyn Record, modifiers: &[Modifier]) -> Self {
        let mut call = Self::new(context, Modifiers::from(modifiers));
        call.target_record = Some(RecordSnapshot::capture(record));

        call
    }

    ///
    /// CONSTRAINTS
    ///

    /// Match only calls whose record is deep-equal to `record`.
    pub fn for_record(&mut self, record: &dyn Record) -> &mut Self {
        self.target_record = Some(RecordSnapshot::capture(record));
        self
    }

    /// Match only records of the given type. Reference sigils are ignored;
    /// a path-qualified name must match the full path, a bare name matches
    /// that type in any module. An empty name leaves the type unconstrained.
    pub fn for_type(&mut self, type_name: &str) -> &mut Self {
        let type_name = normalize_type_name(type_name);
        self.target_type = (!type_name.is_empty()).then_some(type_name);
        self
    }

    /// Match only records stored in `table`. An empty name leaves the
    /// table unconstrained.
    pub fn for_table(&mut self, table: impl Into<String>) -> &mut Self {
        let table = table.into();
        self.target_table = (!table.is_empty()).then_some(table);
        self
    }

    /// Match only records that structurally contain `partial`.
    pub fn for_contains(&mut self, partial: PartialRecord) -> &mut Self {
        self.target_contains = Some(partial);
        self
    }

    ///
    /// RESULT
    ///

    pub fn error(&mut self, err: Error) -> &mut Assertion {
        self.result = Some(err);
        &mut self.assertion
    }

    pub fn success(&mut self) -> &mut Assertion {
        self.result = None;
        &mut self.assertion
    }

    pub fn connection_closed(&mut self) -> &mut Assertion {
        self.error(Error::connection_closed())
    }

    ///
    /// INSPECTION
    ///

    #[must_use]
    pub const fn assertion(&self) -> &Assertion {
        &self.assertion
    }

    #[must_use]
    pub const fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    #[must_use]
    pub const fn result(&self) -> Option<&Error> {
        self.result.as_ref()
    }

    /// Declaration as it would appear at a call site.
    #[must_use]
    pub fn describe(&self) -> String {
        format::describe_call(self)
    }

    /// Registration code that would accept this call.
    #[must_use]
    pub fn describe_registration(&self) -> String {
        format::describe_registration(self)
    }

    ///
    /// MATCHING
    ///

    /// Structural predicates only; the budget is checked separately.
    /// Short-circuits on the first failing predicate.
    pub(crate) fn matches(&self, record: &dyn Record, modifiers: &[Modifier]) -> bool {
        self.target_record
            .as_ref()
            .is_none_or(|target| target.matches(record))
            && self
                .target_type
                .as_ref()
                .is_none_or(|target| type_name_matches(target, record.type_name()))
            && self
                .target_table
                .as_ref()
                .is_none_or(|target| target == record.table())
            && self
                .target_contains
                .as_ref()
                .is_none_or(|partial| record.contains(partial))
            && self.modifiers.multiset_eq(modifiers)
    }
}

impl fmt::Display for MockDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

///
/// DeleteExpectations
///
/// Ordered expectation set for the delete operation.
/// Registration order is significant: the first satisfied entry wins.
///

#[derive(Clone, Debug, Default)]
pub struct DeleteExpectations {
    entries: Vec<MockDelete>,
    diagnostics: DiagnosticsConfig,
}

impl DeleteExpectations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &MockConfig) -> Self {
        Self {
            entries: Vec::new(),
            diagnostics: config.diagnostics.clone(),
        }
    }

    /// Append a new expectation and hand back its builder.
    /// Nothing is validated here; contradictions surface on execute/assert.
    pub fn register(&mut self, context: CallContext, modifiers: &[Modifier]) -> &mut MockDelete {
        events::record(&MockEvent::Register {
            kind: OpKind::Delete,
        });

        let index = self.entries.len();
        self.entries.push(MockDelete::new(context, Modifiers::from(modifiers)));

        &mut self.entries[index]
    }

    /// Resolve one delete call against the declared expectations.
    ///
    /// Returns the programmed result of the first entry whose constraints
    /// and budget accept the call. A call nothing accepts is fatal and goes
    /// to `sink.abort`.
    pub fn execute(
        &mut self,
        context: &CallContext,
        record: &dyn Record,
        modifiers: &[Modifier],
        sink: &dyn FailureSink,
    ) -> Result<(), Error> {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.assertion.is_exhausted() {
                continue;
            }

            if entry.matches(record, modifiers) && entry.assertion.accept(context) {
                events::record(&MockEvent::Match {
                    kind: OpKind::Delete,
                    table: record.table(),
                    index,
                });

                return entry.result.clone().map_or(Ok(()), Err);
            }
        }

        events::record(&MockEvent::Miss {
            kind: OpKind::Delete,
            table: record.table(),
        });

        let call = MockDelete::unregistered(*context, record, modifiers);
        let err = format::DiagnosticFormatter::new(&self.diagnostics).unmatched(&call, &self.entries);

        sink.abort(&err.to_string())
    }

    /// Teardown verification.
    ///
    /// Every entry is checked, so one pass reports every unmet expectation.
    /// The set is cleared only when all of them were met.
    pub fn assert(&mut self, sink: &dyn FailureSink) -> bool {
        let mut unmet = 0u64;
        for entry in &self.entries {
            if !entry.assertion.verify(sink, entry) {
                unmet += 1;
            }
        }

        events::record(&MockEvent::Verify {
            kind: OpKind::Delete,
            checked: self.entries.len() as u64,
            unmet,
        });

        if unmet > 0 {
            return false;
        }

        self.entries.clear();
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MockDelete> {
        self.entries.iter()
    }
}
