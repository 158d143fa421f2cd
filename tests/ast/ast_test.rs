//! Tests for building, traversing and emitting AST nodes.

use std::sync::Arc;

use chrono::NaiveDate;
use vsql::ast::{Ast, AstKind, BinaryOp, UnaryOp};
use vsql::compile::compile;
use vsql::query::Query;
use vsql::schema::{Field, Group, Vars};
use vsql::types::{DataType, NodeType};

/// Groups are returned so they outlive the queries; fields only hold weak
/// references to the groups they refer to.
fn person_vars() -> (Vec<Arc<Group>>, Vars) {
    let company = Group::new("company");
    company.add_field("name", DataType::Str, "{a}.com_name");

    let person = Group::new("person");
    person.add_field("name", DataType::Str, "{a}.per_name");
    person.add_ref(
        "company",
        DataType::Int,
        "{a}.com_id",
        "{m}.com_id = {d}.com_id",
        &company,
    );

    let mut vars = Vars::new();
    vars.insert(
        "p".to_string(),
        Arc::new(Field::root("p", DataType::Int).with_refgroup(&person)),
    );
    (vec![company, person], vars)
}

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn test_constructed_nodes_are_typed() {
    let cases = [
        (Ast::make_none(), DataType::Null, NodeType::ConstNone),
        (Ast::make_bool(true), DataType::Bool, NodeType::ConstBool),
        (Ast::make_int(7), DataType::Int, NodeType::ConstInt),
        (Ast::make_number(0.5), DataType::Number, NodeType::ConstNumber),
        (Ast::make_str("x"), DataType::Str, NodeType::ConstStr),
        (Ast::make_clob("x"), DataType::Clob, NodeType::ConstClob),
    ];
    for (ast, datatype, nodetype) in cases {
        assert_eq!(ast.datatype, Some(datatype), "{ast}");
        assert_eq!(ast.nodetype(), nodetype, "{ast}");
        assert!(ast.error.is_none());
    }
}

#[test]
fn test_constructed_sources() {
    let ast = Ast::make_binary(
        BinaryOp::Mul,
        Ast::make_unary(UnaryOp::Neg, Ast::make_int(2)),
        Ast::make_binary(BinaryOp::Add, Ast::make_number(1.5), Ast::make_int(1)),
    );
    assert_eq!(ast.source(), "-2 * (1.5 + 1)");
    assert_eq!(ast.datatype, Some(DataType::Number));

    let cmp = Ast::make_binary(
        BinaryOp::Lt,
        Ast::make_func("today", vec![]),
        Ast::make_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
    );
    assert_eq!(cmp.source(), "today() < @(2024-01-31)");
    assert_eq!(cmp.datatype, Some(DataType::Bool));

    let date = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();
    let attr = Ast::make_attr(Ast::make_date(date), "year");
    assert_eq!(attr.source(), "@(2000-02-29).year");
    assert_eq!(attr.datatype, Some(DataType::Int));

    let list = Ast::make_list(vec![Ast::make_str("a"), Ast::make_none()]);
    assert_eq!(list.source(), "['a', None]");
    assert_eq!(list.datatype, Some(DataType::StrList));
}

#[test]
fn test_invalid_constructions_record_errors() {
    let ast = Ast::make_binary(BinaryOp::Add, Ast::make_int(1), Ast::make_str("x"));
    assert!(ast.error.is_some());
    assert!(ast.datatype.is_none());
    assert!(ast.check_valid(None).is_err());

    let outer = Ast::make_unary(UnaryOp::Not, ast);
    assert!(outer.error.is_some());
}

#[test]
fn test_display() {
    let ast = Ast::make_meth(Ast::make_str("x"), "upper", vec![]);
    assert_eq!(ast.to_string(), "vsql.METH(datatype STR): 'x'.upper()");

    let bad = Ast::make_func("frobnicate", vec![]);
    assert_eq!(bad.to_string(), "vsql.FUNC(error NAME): frobnicate()");
}

// ============================================================================
// Source preservation
// ============================================================================

#[test]
fn test_compiled_source_is_verbatim() {
    let vars = Vars::new();
    for source in [
        "1+2",
        "( 1 + 2 ) * 3",
        "'a' if True else  'b'",
        "now() + years( 3 )",
        "[1, 2,][0]",
        "{1 ,2}",
        "'abc'.upper()[1:]",
        "not   None",
    ] {
        let ast = compile(source, &vars).unwrap();
        assert_eq!(ast.source(), source);
    }
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_walk() {
    let ast = compile("len('abc') > 2 * 3", &Vars::new()).unwrap();
    let sources: Vec<String> = ast.walknodes().iter().map(|node| node.source()).collect();
    assert_eq!(sources, vec!["len('abc')", "'abc'", "2 * 3", "2", "3"]);

    let paths = ast.walkpaths();
    assert_eq!(paths.len(), 6);
    assert_eq!(paths[0].len(), 1);
    let deepest: Vec<String> = paths[2].iter().map(|node| node.source()).collect();
    assert_eq!(deepest, vec!["len('abc') > 2 * 3", "len('abc')", "'abc'"]);
}

#[test]
fn test_fieldrefs() {
    let (_groups, vars) = person_vars();
    let ast = compile("p.company.name == p.name", &vars).unwrap();
    assert!(ast.error.is_none());

    let refs: Vec<String> = ast
        .fieldrefs()
        .iter()
        .filter_map(|node| node.full_identifier())
        .collect();
    assert_eq!(refs, vec!["p.company.name", "p.name"]);

    let AstKind::Binary { obj1, .. } = &ast.kind else {
        panic!("expected a binary node");
    };
    assert_eq!(obj1.datatype, Some(DataType::Str));
}

// ============================================================================
// SQL
// ============================================================================

#[test]
fn test_sqlsource_registers_tables() {
    let (_groups, vars) = person_vars();
    let ast = compile("p.company.name.upper()", &vars).unwrap();

    let mut query = Query::new();
    let sql = ast.sqlsource(&mut query).unwrap();
    assert_eq!(sql, "upper(t2.com_name /* p.company.name */)");
    assert_eq!(
        query.sqlsource_with_indent(""),
        "select 42 from person t1 /* p */, company t2 /* p.company */ \
         where t1.com_id = t2.com_id /* p.company */"
    );
}

#[test]
fn test_sqlsource_of_expressions() {
    let vars = Vars::new();
    let sql = |source: &str| {
        compile(source, &vars)
            .unwrap()
            .sqlsource(&mut Query::new())
            .unwrap()
    };
    assert_eq!(sql("\"it's\""), "'it''s'");
    assert_eq!(sql("''"), "null");
    assert_eq!(sql("True"), "1");
    assert_eq!(sql("[1, 2]"), "integers(1, 2)");
    assert_eq!(sql("'x'.upper()"), "upper('x')");
}
