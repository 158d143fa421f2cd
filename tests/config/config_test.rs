//! Loading schemas and settings from files, then building queries with them.

use std::fs;
use std::path::PathBuf;

use vsql::config::{Schema, SchemaError, Settings, SettingsError};
use vsql::types::DataType;

const SCHEMA: &str = r#"
[groups.company]
tablesql = "company"

[groups.company.fields.name]
type = "STR"
sql = "{a}.com_name"

[groups.company.fields.ceo]
type = "INT"
sql = "{a}.com_ceo_id"
join = "{m}.com_ceo_id = {d}.per_id"
ref = "person"

[groups.person]
tablesql = "person"

[groups.person.fields.name]
type = "STR"
sql = "{a}.per_name"

[groups.person.fields.company]
type = "INT"
sql = "{a}.com_id"
join = "{m}.com_id = {d}.com_id"
ref = "company"

[vars.p]
type = "INT"
ref = "person"
"#;

fn temp_file(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vsql-config-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_schema_from_file() {
    let path = temp_file("schema.toml", SCHEMA);
    let schema = Schema::load(&path).unwrap();

    let names: Vec<&str> = schema.groups().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["company", "person"]);
    let person = schema.group("person").unwrap();
    let mut fields = person.field_names();
    fields.sort();
    assert_eq!(fields, vec!["company", "name"]);
    assert_eq!(schema.vars()["p"].datatype, DataType::Int);
}

#[test]
fn test_schema_missing_file() {
    let err = Schema::load("/nonexistent/vsql/schema.toml").unwrap_err();
    assert!(matches!(err, SchemaError::FileNotFound(_)));
}

#[test]
fn test_mutual_references() {
    let schema: Schema = SCHEMA.parse().unwrap();
    let mut query = schema.query();
    query.select_vsql("p.company.ceo.name", None, None).unwrap();

    assert_eq!(
        query.sqlsource_with_indent(""),
        "select t3.per_name /* p.company.ceo.name */ \
         from person t1 /* p */, company t2 /* p.company */, person t3 /* p.company.ceo */ \
         where t1.com_id = t2.com_id /* p.company */ and t2.com_ceo_id = t3.per_id /* p.company.ceo */"
    );
}

#[test]
fn test_schema_rejects_unknown_keys() {
    let err = "[groups.g]\ntable = \"g\"\n".parse::<Schema>().unwrap_err();
    assert!(matches!(err, SchemaError::ParseError(_)));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_settings_from_file() {
    std::env::set_var("VSQL_CONFIG_TEST_TAG", "nightly");
    let path = temp_file(
        "config.toml",
        "[render]\nindent = \"  \"\ncomment = \"${VSQL_CONFIG_TEST_TAG} report\"\n",
    );
    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.render.indent, "  ");
    assert_eq!(settings.render.comment.as_deref(), Some("nightly report"));

    let schema: Schema = SCHEMA.parse().unwrap();
    let mut query = schema.query();
    query.select_vsql("p.name", None, None).unwrap();
    assert_eq!(
        settings.render.render(&query),
        "/* nightly report */\nselect\n  t1.per_name /* p.name */\nfrom\n  person t1 /* p */"
    );
}

#[test]
fn test_settings_missing_file() {
    let err = Settings::from_file("/nonexistent/vsql/config.toml").unwrap_err();
    assert!(matches!(err, SettingsError::FileNotFound(_)));
}
