//! Tests for how invalid expressions are reported.

use std::sync::Arc;

use vsql::compile::{compile, compile_valid, CompileError};
use vsql::error::{ErrorKind, VsqlError};
use vsql::schema::{Field, Group, Vars};
use vsql::types::DataType;

fn invalid(source: &str, context: Option<&str>) -> VsqlError {
    match compile_valid(source, &Vars::new(), context) {
        Err(CompileError::Invalid(err)) => err,
        other => panic!("expected {source:?} to be invalid, got {other:?}"),
    }
}

// ============================================================================
// Message prefixes
// ============================================================================

#[test]
fn test_prefix_for_root_error() {
    let err = invalid("1 + 'x'", None);
    assert!(err.cause_is_root);
    assert_eq!(
        err.to_string(),
        "Error in vSQL expression `1 + 'x'`: Type combination `INT`, `STR` is not supported."
    );

    let err = invalid("1 + 'x'", Some("orderby"));
    assert_eq!(
        err.to_string(),
        "Error in `orderby` expression `1 + 'x'`: Type combination `INT`, `STR` is not supported."
    );
}

#[test]
fn test_prefix_for_subexpression_error() {
    let err = invalid("len(1) + 2", None);
    assert!(!err.cause_is_root);
    assert_eq!(err.root, "len(1) + 2");
    assert_eq!(err.cause, "len(1)");
    assert_eq!(
        err.to_string(),
        "Error in vSQL subexpression `len(1)` of `len(1) + 2`: Type combination `INT` is not supported."
    );

    let err = invalid("len(1) + 2", Some("select"));
    assert_eq!(
        err.to_string(),
        "Error in `select` subexpression `len(1)` of `len(1) + 2`: Type combination `INT` is not supported."
    );
}

// ============================================================================
// Most specific error wins
// ============================================================================

#[test]
fn test_first_specific_descendant_is_reported() {
    let ast = compile("(1 + 'x') * frobnicate()", &Vars::new()).unwrap();
    assert_eq!(ast.error, Some(ErrorKind::SubnodeError));

    let err = ast.check_valid(None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::SubnodeTypes);
    assert_eq!(err.cause, "1 + 'x'");
}

#[test]
fn test_valid_expression_passes() {
    let ast = compile("3 * 'x'", &Vars::new()).unwrap();
    assert!(ast.check_valid(Some("where")).is_ok());
}

// ============================================================================
// Details per error kind
// ============================================================================

#[test]
fn test_name_errors() {
    let err = invalid("frobnicate()", None);
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.to_string().ends_with("The function name `frobnicate` is unknown."));

    let err = invalid("'x'.frobnicate()", None);
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.to_string().ends_with("The method name `frobnicate` is unknown."));

    let err = invalid("today().fortnight", None);
    assert_eq!(err.kind, ErrorKind::Name);
    assert!(err.to_string().ends_with("The attribute name `fortnight` is unknown."));
}

#[test]
fn test_arity_error() {
    let err = invalid("len()", None);
    assert_eq!(err.kind, ErrorKind::Arity);
    assert!(err.to_string().ends_with("AST node has wrong arity (Internal vSQL error)."));

    let err = invalid("'x'.upper(1)", None);
    assert_eq!(err.kind, ErrorKind::Arity);
}

#[test]
fn test_unknown_field() {
    let person = Group::new("person");
    person.add_field("name", DataType::Str, "{a}.per_name");
    let mut vars = Vars::new();
    vars.insert(
        "p".to_string(),
        Arc::new(Field::root("p", DataType::Int).with_refgroup(&person)),
    );

    let err = match compile_valid("q.name", &vars, None) {
        Err(CompileError::Invalid(err)) => err,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(err.kind, ErrorKind::Field);
    assert_eq!(
        err.to_string(),
        "Error in vSQL subexpression `q` of `q.name`: Expression references the unknown field `q`."
    );
}

#[test]
fn test_nested_error_skips_every_subnode_ancestor() {
    let source = "(q + 1) * 2";
    let ast = compile(source, &Vars::new()).unwrap();
    assert_eq!(ast.error, Some(ErrorKind::SubnodeError));

    let err = invalid(source, None);
    assert_eq!(err.kind, ErrorKind::Field);
    assert_eq!(err.cause, "q");
    assert!(!err.cause_is_root);
    assert_eq!(
        err.to_string(),
        "Error in vSQL subexpression `q` of `(q + 1) * 2`: Expression references the unknown field `q`."
    );
}

#[test]
fn test_malformed_constants() {
    let cases = [
        ("@(2000-02-30)", ErrorKind::ConstDate),
        ("@(2000-01-01T25:00)", ErrorKind::ConstDateTime),
    ];
    for (source, kind) in cases {
        let err = invalid(source, None);
        assert_eq!(err.kind, kind, "{source}");
        assert!(err.kind.is_malformed_constant());
        assert_eq!(
            err.to_string(),
            format!("Error in vSQL expression `{source}`: Constant `{source}` is malformed.")
        );
    }
}

#[test]
fn test_collection_errors() {
    let err = invalid("[1, 'a']", None);
    assert_eq!(err.kind, ErrorKind::ListUnsupportedTypes);
    assert!(err
        .to_string()
        .ends_with("List type can't be determined, since it contains unsupported or mixed types."));

    let err = invalid("{1, 'a'}", None);
    assert_eq!(err.kind, ErrorKind::SetMixedTypes);
    assert!(err
        .to_string()
        .ends_with("Set type can't be determined, since it contains mixed types."));
}
