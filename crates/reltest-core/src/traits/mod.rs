mod macros;

#[cfg(test)]
mod tests;

use crate::value::{Value, contains};
use std::fmt;

// ============================================================================
// RECORD INTROSPECTION
// ============================================================================
//
// These traits describe *what the engine may ask of a record*,
// never how the record is persisted.
//

///
/// Record
///
/// Capability surface the expectation engine needs from a record:
/// a runtime type name, a storage-location (table) name, and a structural
/// projection used for equality and containment.
///
/// Object safe; production code hands records over as `&dyn Record`.
///

pub trait Record {
    /// Runtime type name. Normalized by the engine before comparison.
    fn type_name(&self) -> &str;

    /// Storage-location name the record resolves to.
    fn table(&self) -> &str;

    /// Structural projection, normally a `Value::Record`.
    fn to_value(&self) -> Value;

    /// Whether this record structurally contains every field of `partial`.
    fn contains(&self, partial: &PartialRecord) -> bool {
        contains(&self.to_value(), partial.as_value())
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn table(&self) -> &str {
        (**self).table()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn contains(&self, partial: &PartialRecord) -> bool {
        (**self).contains(partial)
    }
}

/// Normalize a runtime type name for comparison.
///
/// Reference/pointer sigils and surrounding whitespace are dropped; the module
/// path is kept, so same-named types from different modules stay distinct:
/// `&app::model::Point` → `app::model::Point`, `*Point` → `Point`.
#[must_use]
pub fn normalize_type_name(name: &str) -> String {
    let mut rest = name.trim();
    loop {
        let stripped = ["&mut ", "*const ", "*mut ", "&", "*"]
            .iter()
            .find_map(|sigil| rest.strip_prefix(sigil));
        match stripped {
            Some(next) => rest = next.trim_start(),
            None => break,
        }
    }

    rest.to_string()
}

/// Outer type name without its module path. Generic arguments are kept
/// verbatim: `alloc::vec::Vec<app::Point>` → `Vec<app::Point>`.
#[must_use]
pub fn short_type_name(name: &str) -> &str {
    let outer_end = name.find('<').unwrap_or(name.len());
    let start = name[..outer_end].rfind("::").map_or(0, |idx| idx + 2);

    &name[start..]
}

/// Whether the declared `expected` name denotes the runtime type `actual`.
///
/// A path-qualified `expected` must equal the full path or a trailing run of
/// its segments (`billing::Invoice` accepts `app::billing::Invoice`); a bare
/// name matches the outer name in any module.
#[must_use]
pub fn type_name_matches(expected: &str, actual: &str) -> bool {
    let expected = normalize_type_name(expected);
    let actual = normalize_type_name(actual);

    let outer_end = expected.find('<').unwrap_or(expected.len());
    if !expected[..outer_end].contains("::") {
        return expected == short_type_name(&actual);
    }

    actual == expected
        || actual
            .strip_suffix(expected.as_str())
            .is_some_and(|prefix| prefix.ends_with("::"))
}

/// Normalized Rust type name of `T`, module path included, for manual
/// `Record` impls.
#[must_use]
pub fn type_name_of<T: ?Sized>() -> String {
    normalize_type_name(std::any::type_name::<T>())
}

///
/// PartialRecord
///
/// Named subset of a record's fields. Unnamed fields are unconstrained.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PartialRecord {
    value: Value,
}

impl PartialRecord {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: Value::Record(Vec::new()),
        }
    }

    /// Constrain one field. A later call for the same name replaces it.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();

        if let Value::Record(fields) = &mut self.value {
            match fields.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => fields.push((name, value)),
            }
        }

        self
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(&self.value, Value::Record(fields) if fields.is_empty())
    }
}

impl Default for PartialRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

///
/// RecordSnapshot
///
/// Owned capture of a record's identity and structure, taken when an
/// expectation is declared or a call arrives. Equality is deep structural
/// equality: same type (module path included), same table, same field values.
///

#[derive(Clone, Debug, PartialEq)]
pub struct RecordSnapshot {
    type_name: String,
    table: String,
    value: Value,
}

impl RecordSnapshot {
    #[must_use]
    pub fn capture(record: &dyn Record) -> Self {
        Self {
            type_name: normalize_type_name(record.type_name()),
            table: record.table().to_string(),
            value: record.to_value(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Deep structural equality against a live record.
    #[must_use]
    pub fn matches(&self, record: &dyn Record) -> bool {
        self.table == record.table()
            && self.type_name == normalize_type_name(record.type_name())
            && self.value == record.to_value()
    }
}

impl fmt::Display for RecordSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", short_type_name(&self.type_name), self.value)
    }
}
