use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing_test::traced_test;

use super::*;
use crate::coercion::FieldType;

/// Payload covering every coercion rule, recording which setters ran.
#[derive(Debug, Default, PartialEq)]
struct Widget {
    calls: Vec<&'static str>,
    note: Option<String>,
    count: Option<i32>,
    total: Option<i64>,
    ratio: Option<f64>,
    weight: Option<f32>,
    small: Option<i16>,
    tiny: Option<i8>,
    flag: Option<bool>,
    amount: Option<Decimal>,
    due: Option<String>,
    priority: i32,
    positive: Option<i32>,
}

static WIDGET_FIELDS: LazyLock<FieldRegistry<Widget>> = LazyLock::new(|| {
    FieldRegistry::new("Widget")
        .field("note", |p: &mut Widget, v: String| {
            p.calls.push("note");
            p.note = Some(v);
        })
        .field("count", |p: &mut Widget, v: i32| {
            p.calls.push("count");
            p.count = Some(v);
        })
        .field("total", |p: &mut Widget, v: i64| p.total = Some(v))
        .field("ratio", |p: &mut Widget, v: f64| p.ratio = Some(v))
        .field("weight", |p: &mut Widget, v: f32| p.weight = Some(v))
        .field("small", |p: &mut Widget, v: i16| p.small = Some(v))
        .field("tiny", |p: &mut Widget, v: i8| p.tiny = Some(v))
        .field("flag", |p: &mut Widget, v: bool| p.flag = Some(v))
        .field("amount", |p: &mut Widget, v: Decimal| p.amount = Some(v))
        .other("due", "LocalDate", |p: &mut Widget, v: String| p.due = Some(v))
        .required("priority", |p: &mut Widget, v: i32| {
            p.calls.push("priority");
            p.priority = v;
        })
        .validated("positive", |p: &mut Widget, v: i32| {
            if v <= 0 {
                return Err(ApplyError::Rejected(format!("{} is not positive", v)));
            }
            p.positive = Some(v);
            Ok(())
        })
});

impl Settable for Widget {
    fn registry() -> &'static FieldRegistry<Self> {
        &WIDGET_FIELDS
    }
}

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs.iter().copied().collect()
}

#[test]
fn test_registry_lists_declared_fields() {
    let registry = Widget::registry();
    assert_eq!(registry.type_name(), "Widget");
    assert_eq!(registry.len(), 12);
    assert!(registry.contains("amount"));
    assert!(!registry.contains("Amount"));
    assert_eq!(registry.get("due").unwrap().field_type(), FieldType::Other("LocalDate"));
    assert!(!registry.get("priority").unwrap().nullable());
    assert!(registry.get("note").unwrap().nullable());
}

#[test]
fn test_set_field_applies_each_type() {
    let mut widget = Widget::default();
    let map = fields(&[
        ("note", "hello"),
        ("count", "12"),
        ("total", "9000000000"),
        ("ratio", "0.25"),
        ("weight", "1.5"),
        ("small", "-7"),
        ("tiny", "3"),
        ("flag", "TRUE"),
        ("amount", "10.50"),
        ("due", "01 March 2024"),
        ("priority", "2"),
        ("positive", "5"),
    ]);

    let report = apply_additional_fields(&mut widget, &map, &[]);

    assert!(report.is_clean(), "unexpected skips: {report:?}");
    assert_eq!(report.applied().count(), 12);
    assert_eq!(widget.note.as_deref(), Some("hello"));
    assert_eq!(widget.count, Some(12));
    assert_eq!(widget.total, Some(9_000_000_000));
    assert_eq!(widget.ratio, Some(0.25));
    assert_eq!(widget.weight, Some(1.5));
    assert_eq!(widget.small, Some(-7));
    assert_eq!(widget.tiny, Some(3));
    assert_eq!(widget.flag, Some(true));
    assert_eq!(widget.amount, Some(Decimal::from_str("10.50").unwrap()));
    assert_eq!(widget.due.as_deref(), Some("01 March 2024"));
    assert_eq!(widget.priority, 2);
    assert_eq!(widget.positive, Some(5));
}

#[test]
fn test_excluded_keys_are_never_applied() {
    let mut widget = Widget::default();
    let map = fields(&[("note", "x"), ("count", "4"), ("priority", "9")]);

    let report = apply_additional_fields(&mut widget, &map, &["count", "priority"]);

    assert_eq!(widget.calls, vec!["note"]);
    assert_eq!(widget.count, None);
    assert_eq!(widget.priority, 0);
    assert_eq!(report.status("count"), Some(&FieldStatus::Excluded));
    assert_eq!(report.status("priority"), Some(&FieldStatus::Excluded));
    assert_eq!(report.applied().collect::<Vec<_>>(), vec!["note"]);
}

#[test]
fn test_report_follows_table_order() {
    let mut widget = Widget::default();
    let map = fields(&[("count", "1"), ("unknown", "x"), ("note", "n")]);

    let report = apply_additional_fields(&mut widget, &map, &[]);

    let order: Vec<&str> = report.outcomes().iter().map(|o| o.field.as_str()).collect();
    assert_eq!(order, vec!["count", "unknown", "note"]);
}

#[test]
#[traced_test]
fn test_unknown_field_is_skipped_and_logged() {
    let mut widget = Widget::default();

    let outcome = set_field(&mut widget, "description", "documentation only");

    assert_eq!(
        outcome.status,
        FieldStatus::Skipped(SkipReason::UnknownField { target: "Widget" })
    );
    assert_eq!(widget, Widget::default());
    assert!(logs_contain("No setter found for field"));
    assert!(logs_contain("description"));
}

#[test]
fn test_field_names_are_case_sensitive() {
    let mut widget = Widget::default();

    let outcome = set_field(&mut widget, "Note", "x");

    assert!(matches!(
        outcome.status,
        FieldStatus::Skipped(SkipReason::UnknownField { .. })
    ));
    assert!(widget.note.is_none());
}

#[test]
fn test_blank_field_name_is_a_silent_noop() {
    let mut widget = Widget::default();

    let outcome = set_field(&mut widget, "  ", "value");

    assert_eq!(outcome.status, FieldStatus::Skipped(SkipReason::BlankName));
    assert_eq!(widget, Widget::default());
}

#[test]
fn test_blank_value_never_invokes_setter() {
    let mut widget = Widget {
        note: Some("kept".to_string()),
        ..Widget::default()
    };

    let outcome = set_field(&mut widget, "note", "");

    assert_eq!(outcome.status, FieldStatus::Unset);
    assert!(widget.calls.is_empty());
    assert_eq!(widget.note.as_deref(), Some("kept"));
}

#[test]
#[traced_test]
fn test_blank_value_for_required_field_is_skipped() {
    let mut widget = Widget {
        priority: 7,
        ..Widget::default()
    };

    let outcome = set_field(&mut widget, "priority", " ");

    assert_eq!(
        outcome.status,
        FieldStatus::Skipped(SkipReason::NullForRequired { target: "Widget" })
    );
    assert_eq!(widget.priority, 7);
    assert!(widget.calls.is_empty());
    assert!(logs_contain("Cannot assign blank value to non-nullable field"));
}

#[test]
#[traced_test]
fn test_unparseable_value_is_contained() {
    let mut widget = Widget::default();

    let outcome = set_field(&mut widget, "count", "abc");

    match outcome.status {
        FieldStatus::Skipped(SkipReason::Coercion(e)) => {
            assert_eq!(e.raw(), "abc");
            assert_eq!(e.target(), FieldType::Int);
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(widget.count.is_none());
    assert!(logs_contain("Failed to set additional field"));
    assert!(!logs_contain("falling back"));
}

#[test]
fn test_setter_rejection_is_contained() {
    let mut widget = Widget::default();

    let outcome = set_field(&mut widget, "positive", "-1");

    assert_eq!(
        outcome.status,
        FieldStatus::Skipped(SkipReason::Apply(ApplyError::Rejected(
            "-1 is not positive".to_string()
        )))
    );
    assert!(widget.positive.is_none());
}

#[test]
fn test_one_bad_column_does_not_stop_the_others() {
    let mut widget = Widget::default();
    let map = fields(&[("count", "x"), ("note", "still set"), ("flag", "no")]);

    let report = apply_additional_fields(&mut widget, &map, &[]);

    assert!(!report.is_clean());
    assert_eq!(report.skipped().map(|(f, _)| f).collect::<Vec<_>>(), vec!["count"]);
    assert_eq!(widget.note.as_deref(), Some("still set"));
    assert_eq!(widget.flag, Some(false));
}

#[test]
fn test_capability_rejects_mismatched_value() {
    let mut widget = Widget::default();
    let capability = Widget::registry().get("count").unwrap();

    let err = capability
        .apply(&mut widget, FieldValue::Text("12".to_string()))
        .unwrap_err();

    assert_eq!(
        err,
        ApplyError::TypeMismatch {
            expected: FieldType::Int,
            actual: FieldType::Text,
        }
    );
}

#[test]
fn test_empty_field_map_yields_empty_report() {
    let mut widget = Widget::default();
    let report = apply_additional_fields(&mut widget, &FieldMap::new(), &["count"]);
    assert!(report.is_empty());
    assert!(report.is_clean());
}
