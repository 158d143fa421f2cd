//! Tests for the rule registry: spec expansion, lookup and the standard
//! grammar.

use vsql::rules::{self, Part, RuleRegistry, RuleSpecError};
use vsql::types::{DataType, NodeType};

// ============================================================================
// Spec expansion
// ============================================================================

#[test]
fn test_typeref_expansion() {
    let mut registry = RuleRegistry::new();
    let added = registry
        .add_rules(
            NodeType::Add,
            "T1 <- DATE_DATETIME + MONTHDELTA",
            "vsqlimpl_pkg.add_{t1}_months({s1}, {s2})",
        )
        .unwrap();
    assert_eq!(added, 2);

    let rule = registry
        .lookup(NodeType::Add, None, &[DataType::Date, DataType::MonthDelta])
        .unwrap();
    assert_eq!(rule.result, DataType::Date);
    assert_eq!(rule.to_string(), "DATE <- DATE + MONTHDELTA");
    assert_eq!(
        rule.template,
        vec![
            Part::Literal("vsqlimpl_pkg.add_datetime_months(".into()),
            Part::Child(1),
            Part::Literal(", ".into()),
            Part::Child(2),
            Part::Literal(")".into()),
        ]
    );
}

#[test]
fn test_method_names_shift_typerefs() {
    let mut registry = RuleRegistry::new();
    registry
        .add_rules(NodeType::Meth, "T1 <- STR_CLOB.lower()", "lower({s1})")
        .unwrap();

    let rule = registry
        .lookup(NodeType::Meth, Some("lower"), &[DataType::Clob])
        .unwrap();
    assert_eq!(rule.result, DataType::Clob);
    assert_eq!(rule.vsqlsource, "CLOB <- CLOB.lower()");
    assert_eq!(
        registry.method_arities(DataType::Str, "lower").map(|a| a.len()),
        Some(1)
    );
    assert!(registry.method_arities(DataType::Int, "lower").is_none());
}

#[test]
fn test_first_registration_wins() {
    let mut registry = RuleRegistry::new();
    registry
        .add_rules(NodeType::Func, "INT <- f(INT)", "first({s1})")
        .unwrap();
    let added = registry
        .add_rules(NodeType::Func, "INT <- f(INT_NUMBER)", "second({s1})")
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(registry.duplicates(), 1);

    let rule = registry
        .lookup(NodeType::Func, Some("f"), &[DataType::Int])
        .unwrap();
    assert_eq!(rule.template_source(), "first({s1})");
    assert_eq!(
        registry.function_arities("f").map(|a| a.iter().copied().collect::<Vec<_>>()),
        Some(vec![1])
    );
}

#[test]
fn test_malformed_specs() {
    let mut registry = RuleRegistry::new();
    assert_eq!(
        registry.add_rules(NodeType::Func, "INT <- f(TEXT)", "{s1}"),
        Err(RuleSpecError::UnknownType("TEXT".into()))
    );
    assert_eq!(
        registry.add_rules(NodeType::Add, "T5 <- INT + INT", "{s1}"),
        Err(RuleSpecError::TyperefOutOfRange(5))
    );
    assert!(matches!(
        registry.add_rules(NodeType::Add, "INT <- INT + INT", "{s3}"),
        Err(RuleSpecError::PlaceholderOutOfRange { index: 3, .. })
    ));
    assert!(registry.is_empty());
}

// ============================================================================
// Standard registry
// ============================================================================

#[test]
fn test_standard_registry() {
    rules::init();
    let registry = RuleRegistry::global();
    assert!(registry.len() > 1000);

    for name in ["today", "now", "len", "years", "rgb", "dist", "randrange"] {
        assert!(registry.function_arities(name).is_some(), "{name}");
    }
    assert!(registry.function_arities("frobnicate").is_none());

    let rule = registry
        .lookup(NodeType::Func, Some("now"), &[])
        .unwrap();
    assert_eq!(rule.result, DataType::DateTime);
    assert_eq!(rule.template_source(), "sysdate");
}

#[test]
fn test_standard_attributes() {
    let registry = RuleRegistry::global();
    let rule = registry
        .lookup(NodeType::Attr, Some("year"), &[DataType::Date])
        .unwrap();
    assert_eq!(rule.result, DataType::Int);
    assert!(registry
        .lookup(NodeType::Attr, Some("year"), &[DataType::Str])
        .is_none());
}

#[test]
fn test_rule_display_is_vsql_source() {
    let registry = RuleRegistry::global();
    let rule = registry
        .lookup(NodeType::CmpGt, None, &[DataType::Date, DataType::Date])
        .unwrap();
    assert_eq!(rule.to_string(), "BOOL <- DATE > DATE");
    assert_eq!(rule.to_string(), rule.vsqlsource);
}

#[test]
fn test_rules_for_nodetype() {
    let registry = RuleRegistry::global();
    let rules: Vec<_> = registry.rules_for(NodeType::Neg).collect();
    assert!(!rules.is_empty());
    assert!(rules.iter().all(|rule| rule.nodetype == NodeType::Neg));
    assert!(rules.iter().all(|rule| rule.signature.len() == 1));
}

#[test]
fn test_rule_serialization() {
    let registry = RuleRegistry::global();
    let rule = registry
        .lookup(NodeType::Func, Some("years"), &[DataType::Int])
        .unwrap();
    let json = serde_json::to_value(rule).unwrap();
    assert_eq!(json["nodetype"], "FUNC");
    assert_eq!(json["result"], "MONTHDELTA");
    assert_eq!(json["name"], "years");
    assert_eq!(json["signature"], serde_json::json!(["INT"]));
    assert_eq!(json["template"], serde_json::json!(["(12 * ", 1, ")"]));
}
