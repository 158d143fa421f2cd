//! Parser tests through the public entry points.

use vsql::ast::{BinaryOp, UnaryOp};
use vsql::compile::{compile, CompileError};
use vsql::ingest::IngestError;
use vsql::schema::Vars;
use vsql::syntax::{self, Expr, ExprKind, Literal};

fn parse(source: &str) -> Expr {
    syntax::parse(source).unwrap_or_else(|errs| panic!("{source:?}: {errs:?}"))
}

fn binary_op(expr: &Expr) -> BinaryOp {
    match &expr.kind {
        ExprKind::Binary { op, .. } => *op,
        other => panic!("expected a binary expression, got {other:?}"),
    }
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    let expr = parse("a or b and c");
    assert_eq!(binary_op(&expr), BinaryOp::Or);
    let ExprKind::Binary { right, .. } = &expr.kind else {
        unreachable!();
    };
    assert_eq!(binary_op(right), BinaryOp::And);
}

#[test]
fn test_operator_levels() {
    let cases = [
        ("a == b + c", BinaryOp::Eq),
        ("a in b | c", BinaryOp::Contains),
        ("a | b & c", BinaryOp::BitOr),
        ("a ^ b & c", BinaryOp::BitXor),
        ("a & b << c", BinaryOp::BitAnd),
        ("a << b - c", BinaryOp::ShiftLeft),
        ("a - b % c", BinaryOp::Sub),
        ("a // b[c]", BinaryOp::FloorDiv),
    ];
    for (source, op) in cases {
        assert_eq!(binary_op(&parse(source)), op, "{source}");
    }
}

#[test]
fn test_left_associativity() {
    let source = "10 - 4 - 3";
    let expr = parse(source);
    let ExprKind::Binary { left, .. } = &expr.kind else {
        panic!("expected a binary expression");
    };
    assert_eq!(&source[left.span.clone()], "10 - 4");
}

#[test]
fn test_unary_operators() {
    let expr = parse("not -x");
    let ExprKind::Unary { op, obj } = &expr.kind else {
        panic!("expected a unary expression");
    };
    assert_eq!(*op, UnaryOp::Not);
    assert!(matches!(obj.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));

    assert!(matches!(
        parse("~1").kind,
        ExprKind::Unary { op: UnaryOp::BitNot, .. }
    ));
}

// ============================================================================
// Literals and spans
// ============================================================================

#[test]
fn test_literals() {
    let cases = [
        ("None", Literal::None),
        ("False", Literal::Bool(false)),
        ("0b101", Literal::Int(5)),
        ("0o17", Literal::Int(15)),
        ("2.5", Literal::Float(2.5)),
        (r#""a\nb""#, Literal::Str("a\nb".into())),
    ];
    for (source, literal) in cases {
        assert_eq!(parse(source).kind, ExprKind::Const(literal), "{source}");
    }
}

#[test]
fn test_spans_cover_the_node() {
    let source = "f( (x) , 'ä')";
    let expr = parse(source);
    assert_eq!(expr.span, 0..source.len());

    let ExprKind::Call { args, .. } = &expr.kind else {
        panic!("expected a call");
    };
    let syntax::Arg::Positional(first) = &args[0] else {
        panic!("expected a positional argument");
    };
    assert_eq!(&source[first.span.clone()], "x");
    assert_eq!(&source[first.outer_span.clone()], "(x)");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_syntax_errors() {
    for source in ["", "1 +", "(1", "f(1", "[1, 2", "1 if 2", "a.", "'open"] {
        assert!(syntax::parse(source).is_err(), "{source:?} should not parse");
    }
}

#[test]
fn test_compile_reports_syntax_errors() {
    let err = compile("1 * * 2", &Vars::new()).unwrap_err();
    let CompileError::Syntax(errors) = &err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert!(!errors.is_empty());
    assert!(err.to_string().starts_with("Syntax error: "));
}

#[test]
fn test_unsupported_constructs() {
    let vars = Vars::new();
    assert!(matches!(
        compile("len(x=1)", &vars),
        Err(CompileError::Ingest(IngestError::KeywordArgument(_)))
    ));
    assert!(matches!(
        compile("len(*x)", &vars),
        Err(CompileError::Ingest(IngestError::StarArgument(_)))
    ));
    let err = compile("[len][0]()", &vars).unwrap_err();
    assert!(matches!(err, CompileError::Ingest(IngestError::Callee(_))));
    assert_eq!(
        err.to_string(),
        "Only functions and methods can be called in vSQL: `[len][0]()`"
    );
}
