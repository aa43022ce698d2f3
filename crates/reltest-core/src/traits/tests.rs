use crate::{
    traits::{
        PartialRecord, Record, RecordSnapshot, normalize_type_name, short_type_name,
        type_name_matches, type_name_of,
    },
    value::Value,
};

crate::record! {
    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        id: u64,
        name: String,
        count: i64,
        score_id: Option<u64>,
    }

    table: "points",
}

fn point(id: u64, name: &str) -> Point {
    Point {
        id,
        name: name.to_string(),
        count: 0,
        score_id: None,
    }
}

///
/// Manual impl with a fully qualified runtime type name.
///

struct Ledger;

impl Record for Ledger {
    fn type_name(&self) -> &str {
        "&app::billing::Ledger"
    }

    fn table(&self) -> &str {
        "ledgers"
    }

    fn to_value(&self) -> Value {
        Value::Record(Vec::new())
    }
}

#[test]
fn record_macro_projects_fields_in_declaration_order() {
    let p = point(1, "x");

    assert_eq!(p.type_name(), concat!(module_path!(), "::Point"));
    assert_eq!(p.table(), "points");
    assert_eq!(
        p.to_value(),
        Value::from_fields([
            ("id", Value::Uint(1)),
            ("name", Value::from("x")),
            ("count", Value::Int(0)),
            ("score_id", Value::Null),
        ])
    );
}

#[test]
fn normalize_strips_sigils_and_keeps_module_path() {
    assert_eq!(normalize_type_name("*Point"), "Point");
    assert_eq!(normalize_type_name("&app::model::Point"), "app::model::Point");
    assert_eq!(normalize_type_name("&mut Point"), "Point");
    assert_eq!(normalize_type_name("*const app::Point"), "app::Point");
    assert_eq!(normalize_type_name("  Point "), "Point");
}

#[test]
fn short_name_keeps_generic_arguments() {
    assert_eq!(short_type_name("app::model::Point"), "Point");
    assert_eq!(
        short_type_name("alloc::vec::Vec<app::Point>"),
        "Vec<app::Point>"
    );
}

#[test]
fn bare_type_name_matches_any_module() {
    assert!(type_name_matches("Point", "app::model::Point"));
    assert!(type_name_matches("*Point", "&app::model::Point"));
    assert!(type_name_matches("Point", "Point"));
    assert!(!type_name_matches("Point", "app::model::PointSet"));
}

#[test]
fn qualified_type_name_matches_trailing_segments() {
    assert!(type_name_matches("app::billing::Invoice", "&app::billing::Invoice"));
    assert!(!type_name_matches("app::billing::Invoice", "app::archive::Invoice"));
    assert!(type_name_matches("billing::Invoice", "app::billing::Invoice"));
    assert!(!type_name_matches("billing::Invoice", "app::archive::Invoice"));
    assert!(!type_name_matches("ing::Invoice", "app::billing::Invoice"));
}

#[test]
fn type_name_of_keeps_module_path() {
    assert_eq!(type_name_of::<&Point>(), type_name_of::<Point>());
    assert!(type_name_of::<Point>().ends_with("::Point"));
    assert!(type_name_matches("Point", &type_name_of::<Point>()));
}

#[test]
fn partial_record_field_replaces_duplicates() {
    let partial = PartialRecord::new().field("name", "x").field("name", "y");

    assert_eq!(partial.as_value(), &Value::from_fields([("name", "y")]));
    assert!(!partial.is_empty());
    assert!(PartialRecord::default().is_empty());
}

#[test]
fn record_contains_uses_structural_subset() {
    let p = point(1, "x");

    assert!(p.contains(&PartialRecord::new().field("name", "x")));
    assert!(p.contains(&PartialRecord::new().field("score_id", None::<u64>)));
    assert!(!p.contains(&PartialRecord::new().field("name", "z")));
}

#[test]
fn snapshot_matches_deep_equal_records_only() {
    let snapshot = RecordSnapshot::capture(&point(1, "x"));

    assert!(snapshot.matches(&point(1, "x")));
    assert!(!snapshot.matches(&point(2, "x")));
    assert!(!snapshot.matches(&Ledger));
}

#[test]
fn snapshot_distinguishes_same_named_types() {
    struct ArchivedLedger;

    impl Record for ArchivedLedger {
        fn type_name(&self) -> &str {
            "app::archive::Ledger"
        }

        fn table(&self) -> &str {
            "ledgers"
        }

        fn to_value(&self) -> Value {
            Value::Record(Vec::new())
        }
    }

    let snapshot = RecordSnapshot::capture(&Ledger);

    assert!(snapshot.matches(&Ledger));
    assert!(!snapshot.matches(&ArchivedLedger));
}

#[test]
fn snapshot_normalizes_captured_type_name() {
    let snapshot = RecordSnapshot::capture(&Ledger);

    assert_eq!(snapshot.type_name(), "app::billing::Ledger");
    assert_eq!(snapshot.table(), "ledgers");
    assert_eq!(snapshot.to_string(), "Ledger {}");
}
