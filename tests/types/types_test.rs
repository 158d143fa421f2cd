//! Type inference tests: what datatype compiled expressions end up with.

use vsql::compile::{compile, compile_typed, CompileError};
use vsql::error::ErrorKind;
use vsql::schema::Vars;
use vsql::types::{Aggregate, Color, DataType};

fn datatype(source: &str) -> Option<DataType> {
    compile(source, &Vars::new()).unwrap().datatype
}

fn error(source: &str) -> Option<ErrorKind> {
    compile(source, &Vars::new()).unwrap().error
}

// ============================================================================
// Constants and collections
// ============================================================================

#[test]
fn test_constant_types() {
    let cases = [
        ("None", DataType::Null),
        ("True", DataType::Bool),
        ("42", DataType::Int),
        ("0x2a", DataType::Int),
        ("4.2", DataType::Number),
        ("1e3", DataType::Number),
        ("'x'", DataType::Str),
        ("#fff", DataType::Color),
        ("@(2000-02-29)", DataType::Date),
        ("@(2000-02-29T12:34)", DataType::DateTime),
    ];
    for (source, expected) in cases {
        assert_eq!(datatype(source), Some(expected), "{source}");
    }
}

#[test]
fn test_list_types() {
    assert_eq!(datatype("[]"), Some(DataType::NullList));
    assert_eq!(datatype("[None, None]"), Some(DataType::NullList));
    assert_eq!(datatype("[1, None, 2]"), Some(DataType::IntList));
    assert_eq!(datatype("[1, 2.5]"), Some(DataType::NumberList));
    assert_eq!(datatype("['a', 'b']"), Some(DataType::StrList));
    assert_eq!(datatype("[@(2000-01-01)]"), Some(DataType::DateList));
    assert_eq!(error("[1, 'a']"), Some(ErrorKind::ListUnsupportedTypes));
    assert_eq!(error("[True]"), Some(ErrorKind::ListUnsupportedTypes));
}

#[test]
fn test_set_types() {
    assert_eq!(datatype("{/}"), Some(DataType::NullSet));
    assert_eq!(datatype("{1, 2}"), Some(DataType::IntSet));
    assert_eq!(datatype("{'a'}"), Some(DataType::StrSet));
    assert_eq!(error("{1, 2.5}"), Some(ErrorKind::SetMixedTypes));
    assert_eq!(error("{#fff}"), Some(ErrorKind::SetUnsupportedTypes));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_arithmetic_types() {
    assert_eq!(datatype("1 + 2"), Some(DataType::Int));
    assert_eq!(datatype("True + 1"), Some(DataType::Int));
    assert_eq!(datatype("1 + 2.5"), Some(DataType::Number));
    assert_eq!(datatype("'a' + 'b'"), Some(DataType::Str));
    assert_eq!(datatype("now() + years(3)"), Some(DataType::DateTime));
    assert_eq!(datatype("today() + days(1)"), Some(DataType::Date));
    assert_eq!(datatype("-1"), Some(DataType::Int));
    assert_eq!(datatype("[1] + [2.5]"), Some(DataType::NumberList));
}

#[test]
fn test_comparison_and_logic_types() {
    assert_eq!(datatype("1 < 2"), Some(DataType::Bool));
    assert_eq!(datatype("'a' in 'abc'"), Some(DataType::Bool));
    assert_eq!(datatype("1 is None"), Some(DataType::Bool));
    assert_eq!(datatype("not 1"), Some(DataType::Bool));
    assert_eq!(datatype("1 if True else 2"), Some(DataType::Int));
}

#[test]
fn test_type_mismatch() {
    assert_eq!(error("1 + 'x'"), Some(ErrorKind::SubnodeTypes));
    assert_eq!(error("(1 + 'x') * 2"), Some(ErrorKind::SubnodeError));
    assert_eq!(datatype("(1 + 'x') * 2"), None);
}

// ============================================================================
// Compatibility
// ============================================================================

#[test]
fn test_compile_typed_widens() {
    let vars = Vars::new();
    assert!(compile_typed("1", &vars, DataType::Number).is_ok());
    assert!(compile_typed("True", &vars, DataType::Int).is_ok());
    assert!(compile_typed("[1, 2]", &vars, DataType::NumberList).is_ok());
    assert!(compile_typed("[]", &vars, DataType::StrList).is_ok());

    let err = compile_typed("1.5", &vars, DataType::Int).unwrap_err();
    let CompileError::Invalid(err) = err else {
        panic!("expected a datatype error");
    };
    assert_eq!(err.kind, ErrorKind::Datatype(DataType::Int));
    assert_eq!(
        err.to_string(),
        "Error in vSQL expression `1.5`: The expression should be of type `INT` but is of type `NUMBER`."
    );
}

#[test]
fn test_compatibility_holds_for_every_type() {
    for datatype in DataType::ALL {
        assert_eq!(DataType::compatible_to(datatype, Some(datatype)), Ok(()), "{datatype}");
        assert_eq!(DataType::compatible_to(DataType::Null, Some(datatype)), Ok(()), "{datatype}");
        assert_eq!(DataType::compatible_to(datatype, None), Ok(()), "{datatype}");
    }
    assert_eq!(DataType::ALL.len(), 26);
}

#[test]
fn test_error_kind_names() {
    assert_eq!(ErrorKind::Datatype(DataType::DateTime).name(), "DATATYPE_DATETIME");
    assert_eq!(ErrorKind::ListUnsupportedTypes.to_string(), "LISTUNSUPPORTEDTYPES");
    assert!(ErrorKind::ConstColor.is_malformed_constant());
    assert!(!ErrorKind::Field.is_malformed_constant());
}

#[test]
fn test_aggregates_by_type() {
    assert_eq!(Aggregate::from_str("SUM"), Some(Aggregate::Sum));
    assert_eq!(Aggregate::from_str("avg"), None);
    for datatype in [DataType::Int, DataType::Number, DataType::MonthDelta] {
        assert!(datatype.supports(Aggregate::Sum));
    }
    for datatype in [DataType::Str, DataType::Date, DataType::DateTime] {
        assert!(datatype.supports(Aggregate::Min));
        assert!(!datatype.supports(Aggregate::Sum));
    }
    assert!(!DataType::IntList.supports(Aggregate::Group));
    assert!(DataType::IntList.supports(Aggregate::Count));
}

#[test]
fn test_color() {
    let color = Color::new(0x12, 0x34, 0x56, 0xff);
    assert_eq!(color.hex(), "123456ff");
    assert_eq!(color.to_string(), "#123456");
    assert_eq!(Color::new(0, 0, 0, 0x80).to_string(), "#00000080");
    assert_eq!(color.packed(), 0x123456ff);
}
