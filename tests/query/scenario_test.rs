//! End-to-end tests: vSQL expressions in, complete SQL queries out.

use std::sync::Arc;

use insta::assert_snapshot;
use vsql::query::{Query, SortDir};
use vsql::schema::{Field, Group};
use vsql::types::DataType;

/// `person` and `company` tables; `p` is a person.
struct Tables {
    _company: Arc<Group>,
    _person: Arc<Group>,
    p: Arc<Field>,
}

fn tables(with_company: bool) -> Tables {
    let company = Group::new("company");
    company.add_field("id", DataType::Int, "{a}.com_id");
    company.add_field("name", DataType::Str, "{a}.com_name");

    let person = Group::new("person");
    person.add_field("id", DataType::Int, "{a}.per_id");
    person.add_field("firstname", DataType::Str, "{a}.per_firstname");
    person.add_field("lastname", DataType::Str, "{a}.per_lastname");
    person.add_field("birthday", DataType::Date, "{a}.per_birthday");
    if with_company {
        person.add_ref(
            "company",
            DataType::Int,
            "{a}.com_id",
            "{m}.com_id = {d}.com_id",
            &company,
        );
    }

    let p = Arc::new(Field::root("p", DataType::Int).with_refgroup(&person));
    Tables {
        _company: company,
        _person: person,
        p,
    }
}

// ============================================================================
// Without tables
// ============================================================================

#[test]
fn test_constant_expressions_select_from_dual() {
    let mut query = Query::new();
    query
        .select_vsql("('foo'.upper() + 'bar'.lower())[:3]", None, None)
        .unwrap();
    query.select_vsql("now() + years(3)", None, None).unwrap();

    let sql = query.sqlsource();
    assert!(sql.ends_with("from\n\tdual"));
    assert_snapshot!("constant_expressions", sql);
}

// ============================================================================
// One table
// ============================================================================

#[test]
fn test_single_table() {
    let tables = tables(false);
    let mut query = Query::new().var("p", Arc::clone(&tables.p));

    query.select_vsql("p.firstname + ' ' + p.lastname", None, None).unwrap();
    query.select_vsql("p.birthday", None, None).unwrap();
    query.where_vsql("p.birthday > @(1990-01-01)").unwrap();
    query
        .orderby_vsql("p.birthday", Some(SortDir::Desc), None)
        .unwrap();

    let sql = query.sqlsource_with_indent("");
    assert_eq!(sql.matches("person t1").count(), 1);
    assert!(!sql.contains(" t2"));
    assert_eq!(sql.matches(" = 1 ").count(), 1);
    assert_snapshot!("single_table", query.sqlsource());
}

// ============================================================================
// Foreign keys
// ============================================================================

#[test]
fn test_foreign_key_adds_table_and_join() {
    let tables = tables(true);
    let mut query = Query::new().var("p", Arc::clone(&tables.p));

    query.select_vsql("p.company.name", None, None).unwrap();

    assert_eq!(
        query.sqlsource_with_indent(""),
        "select t2.com_name /* p.company.name */ \
         from person t1 /* p */, company t2 /* p.company */ \
         where t1.com_id = t2.com_id /* p.company */"
    );
}

#[test]
fn test_registered_root_and_foreign_key() {
    let tables = tables(true);
    let mut query = Query::new().var("p", Arc::clone(&tables.p));

    query.register_vsql("p").unwrap();
    query.select_vsql("p.firstname + ' ' + p.lastname", None, None).unwrap();
    query.select_vsql("p.birthday", None, None).unwrap();
    query.select_vsql("p.company.name", None, None).unwrap();
    query.where_vsql("p.birthday > @(1990-01-01)").unwrap();
    query
        .orderby_vsql("p.birthday", Some(SortDir::Desc), None)
        .unwrap();

    assert_snapshot!("foreign_key", query.sqlsource());
}

#[test]
fn test_registered_root_without_expressions() {
    let tables = tables(false);
    let mut query = Query::new().var("p", Arc::clone(&tables.p));
    query.register_vsql("p").unwrap();

    assert_eq!(
        query.sqlsource(),
        "select\n\t42\nfrom\n\tperson t1 /* p */"
    );
}
