use crate::value::Value;

/// Structural containment of `expected` inside `actual`.
///
/// Rules:
/// 1. Records: every named expected field must exist on `actual` and
///    recursively contain the expected field value. Extra actual fields are
///    unconstrained.
/// 2. Lists: every expected element must be contained by some actual element.
/// 3. Anything else: plain equality.
#[must_use]
pub fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Record(_), Value::Record(expected_fields)) => {
            expected_fields.iter().all(|(name, expected_value)| {
                actual
                    .field(name)
                    .is_some_and(|actual_value| contains(actual_value, expected_value))
            })
        }
        (Value::List(actual_items), Value::List(expected_items)) => {
            expected_items.iter().all(|expected_item| {
                actual_items
                    .iter()
                    .any(|actual_item| contains(actual_item, expected_item))
            })
        }
        _ => actual == expected,
    }
}
