//! Tests for query assembly: aliases, deduplication, aggregation and
//! rendering options.

use std::sync::Arc;

use insta::assert_snapshot;
use vsql::compile::CompileError;
use vsql::error::ErrorKind;
use vsql::query::{NullsOrder, Query, QueryError, SortDir};
use vsql::schema::{Field, Group};
use vsql::types::{Aggregate, DataType};

fn person_query() -> (Vec<Arc<Group>>, Query) {
    let company = Group::new("company");
    company.add_field("id", DataType::Int, "{a}.com_id");
    company.add_field("name", DataType::Str, "{a}.com_name");

    let person = Group::new("person");
    person.add_field("firstname", DataType::Str, "{a}.per_firstname");
    person.add_field("lastname", DataType::Str, "{a}.per_lastname");
    person.add_field("age", DataType::Int, "{a}.per_age");
    person.add_field("birthday", DataType::Date, "{a}.per_birthday");
    person.add_ref(
        "company",
        DataType::Int,
        "{a}.com_id",
        "{m}.com_id = {d}.com_id",
        &company,
    );
    person.add_ref(
        "boss",
        DataType::Int,
        "{a}.per_boss_id",
        "{m}.per_boss_id = {d}.per_id",
        &person,
    );

    let p = Field::root("p", DataType::Int).with_refgroup(&person);
    let query = Query::new().var("p", Arc::new(p));
    (vec![company, person], query)
}

// ============================================================================
// Aliases
// ============================================================================

#[test]
fn test_paths_share_aliases() {
    let (_groups, mut query) = person_query();
    query.select_vsql("p.company.name", None, None).unwrap();
    query.select_vsql("p.company.id", None, None).unwrap();
    query.select_vsql("p.firstname", None, None).unwrap();

    let sql = query.sqlsource_with_indent("");
    assert_eq!(sql.matches("company t2").count(), 1);
    assert_eq!(sql.matches("t1.com_id = t2.com_id").count(), 1);
    assert!(sql.contains("t2.com_id /* p.company.id */"));
    assert!(sql.contains("t1.per_firstname /* p.firstname */"));
}

#[test]
fn test_self_reference_gets_new_alias_per_path() {
    let (_groups, mut query) = person_query();
    query.select_vsql("p.boss.boss.lastname", None, None).unwrap();

    assert_eq!(
        query.sqlsource_with_indent(""),
        "select t3.per_lastname /* p.boss.boss.lastname */ \
         from person t1 /* p */, person t2 /* p.boss */, person t3 /* p.boss.boss */ \
         where t1.per_boss_id = t2.per_id /* p.boss */ and t2.per_boss_id = t3.per_id /* p.boss.boss */"
    );
}

#[test]
fn test_aliases_are_stable_across_clauses() {
    let (_groups, mut query) = person_query();
    query.where_vsql("p.company.name == 'ACME'").unwrap();
    query.select_vsql("p.lastname", None, None).unwrap();
    query
        .orderby_vsql("p.company.name", Some(SortDir::Asc), Some(NullsOrder::Last))
        .unwrap();

    let sql = query.sqlsource_with_indent("");
    assert!(sql.starts_with("select t1.per_lastname /* p.lastname */ from person t1 /* p */, company t2"));
    assert!(sql.ends_with("order by t2.com_name /* p.company.name */ asc nulls last"));
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn test_select_and_where_are_deduplicated() {
    let (_groups, mut query) = person_query();
    query.select_vsql("p.firstname", None, None).unwrap();
    query.select_vsql("p.firstname", None, None).unwrap();
    query.where_vsql("p.age > 18").unwrap();
    query.where_vsql("p.age > 18").unwrap();

    let sql = query.sqlsource_with_indent("");
    assert_eq!(sql.matches("/* p.firstname */").count(), 1);
    assert_eq!(sql.matches("/* p.age > 18 */").count(), 1);
}

#[test]
fn test_orderby_keeps_repeats() {
    let (_groups, mut query) = person_query();
    query.orderby_vsql("p.age", None, None).unwrap();
    query.orderby_vsql("p.age", Some(SortDir::Desc), None).unwrap();

    assert!(query
        .sqlsource_with_indent("")
        .ends_with("order by t1.per_age /* p.age */, t1.per_age /* p.age */ desc"));
}

// ============================================================================
// Where
// ============================================================================

#[test]
fn test_where_wraps_non_boolean_conditions() {
    let (_groups, mut query) = person_query();
    query.where_vsql("p.firstname").unwrap();
    query.where_vsql("True").unwrap();

    assert_snapshot!("where_bool", query.sqlsource());
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_aggregated_select_groups_by() {
    let (_groups, mut query) = person_query();
    query
        .select_vsql("p.lastname", None, Some(Aggregate::Group))
        .unwrap();
    query
        .select_vsql("", Some("cnt"), Some(Aggregate::Count))
        .unwrap();
    query
        .select_vsql("p.birthday", Some("youngest"), Some(Aggregate::Max))
        .unwrap();

    assert_snapshot!("aggregated", query.sqlsource());
}

#[test]
fn test_count_ignores_expression() {
    let mut query = Query::new();
    query
        .select_vsql("this is not vSQL", None, Some(Aggregate::Count))
        .unwrap();
    assert_eq!(query.sqlsource_with_indent(""), "select count(*) from dual");
}

#[test]
fn test_mixing_aggregation_fails() {
    let (_groups, mut query) = person_query();
    query.select_vsql("p.lastname", None, None).unwrap();
    let err = query
        .select_vsql("p.age", None, Some(Aggregate::Sum))
        .unwrap_err();
    assert!(matches!(err, QueryError::MixedAggregation));

    let (_groups, mut query) = person_query();
    query.select_vsql("p.age", None, Some(Aggregate::Sum)).unwrap();
    let err = query.select_vsql("p.lastname", None, None).unwrap_err();
    assert!(matches!(err, QueryError::MixedAggregation));
    let err = query.select_sql("1", None, None).unwrap_err();
    assert!(matches!(err, QueryError::MixedAggregation));
}

#[test]
fn test_unsupported_aggregate() {
    let (_groups, mut query) = person_query();
    let err = query
        .select_vsql("p.lastname", None, Some(Aggregate::Sum))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can't aggregate expression 'p.lastname' of type STR using aggregation SUM"
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_expression_reports_context() {
    let (_groups, mut query) = person_query();
    let err = query.where_vsql("p.nope").unwrap_err();
    match err {
        QueryError::Compile(CompileError::Invalid(err)) => {
            assert_eq!(err.kind, ErrorKind::Name);
            assert_eq!(err.context.as_deref(), Some("where"));
            assert_eq!(
                err.to_string(),
                "Error in `where` expression `p.nope`: The attribute name `nope` is unknown."
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unknown_root_variable() {
    let err = Query::new().select_vsql("q.name", None, None).unwrap_err();
    match err {
        QueryError::Compile(CompileError::Invalid(err)) => {
            assert_eq!(err.kind, ErrorKind::Field);
            assert_eq!(err.cause, "q");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

// ============================================================================
// Raw SQL and rendering
// ============================================================================

#[test]
fn test_raw_sql_clauses() {
    let mut query = Query::new().with_comment("report");
    query.select_sql("count(*)", Some("all"), Some("total")).unwrap();
    query.from_sql("dual", None, None).unwrap();
    query.where_sql("1 = 1", None);
    query.orderby_sql("1", Some(SortDir::Desc), Some(NullsOrder::First));
    query.offset(Some(10)).limit(Some(5));

    assert_eq!(
        query.sqlsource_with_indent(""),
        "/* report */ select count(*) /* all */ as total from dual where 1 = 1 \
         order by 1 desc nulls first offset 10 rows fetch next 5 rows only"
    );
}

#[test]
fn test_indent() {
    let mut query = Query::new();
    query.select_sql("a", None, None).unwrap();
    query.select_sql("b", None, None).unwrap();
    assert_eq!(
        query.sqlsource_with_indent("  "),
        "select\n  a,\n  b\nfrom\n  dual"
    );
    assert_eq!(query.to_string(), "select\n\ta,\n\tb\nfrom\n\tdual");
}
