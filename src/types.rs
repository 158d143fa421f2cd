//! Value types, aggregations and node tags.
//!
//! The type lattice is closed: every vSQL expression has exactly one of the
//! [`DataType`] variants (or none at all, when it is invalid). The widening
//! relation between types lives in [`DataType::compatible_to`].

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ErrorKind;

// ============================================================================
// Aggregate
// ============================================================================

/// Aggregation applied to a select expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Group,
    Count,
    Min,
    Max,
    Sum,
}

impl Aggregate {
    /// SQL function name (`group` never reaches the SQL as a function).
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregate::Group => "group",
            Aggregate::Count => "count",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Sum => "sum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "group" => Some(Aggregate::Group),
            "count" => Some(Aggregate::Count),
            "min" => Some(Aggregate::Min),
            "max" => Some(Aggregate::Max),
            "sum" => Some(Aggregate::Sum),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Aggregate::Group => "GROUP",
            Aggregate::Count => "COUNT",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
            Aggregate::Sum => "SUM",
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DataType
// ============================================================================

/// The datatypes supported in vSQL expressions.
///
/// The declaration order matters: it is the order of the `ANY` type group
/// used by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    Null,
    Bool,
    Int,
    Number,
    Str,
    Clob,
    Color,
    Geo,
    Date,
    DateTime,
    DateDelta,
    DateTimeDelta,
    MonthDelta,
    NullList,
    IntList,
    NumberList,
    StrList,
    ClobList,
    DateList,
    DateTimeList,
    NullSet,
    IntSet,
    NumberSet,
    StrSet,
    DateSet,
    DateTimeSet,
}

const GROUP_MIN_MAX_SUM: &[Aggregate] =
    &[Aggregate::Group, Aggregate::Min, Aggregate::Max, Aggregate::Sum];
const GROUP_MIN_MAX: &[Aggregate] = &[Aggregate::Group, Aggregate::Min, Aggregate::Max];

impl DataType {
    /// All datatypes in declaration order.
    pub const ALL: [DataType; 26] = [
        DataType::Null,
        DataType::Bool,
        DataType::Int,
        DataType::Number,
        DataType::Str,
        DataType::Clob,
        DataType::Color,
        DataType::Geo,
        DataType::Date,
        DataType::DateTime,
        DataType::DateDelta,
        DataType::DateTimeDelta,
        DataType::MonthDelta,
        DataType::NullList,
        DataType::IntList,
        DataType::NumberList,
        DataType::StrList,
        DataType::ClobList,
        DataType::DateList,
        DataType::DateTimeList,
        DataType::NullSet,
        DataType::IntSet,
        DataType::NumberSet,
        DataType::StrSet,
        DataType::DateSet,
        DataType::DateTimeSet,
    ];

    /// Upper case name as used in rule specs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Null => "NULL",
            DataType::Bool => "BOOL",
            DataType::Int => "INT",
            DataType::Number => "NUMBER",
            DataType::Str => "STR",
            DataType::Clob => "CLOB",
            DataType::Color => "COLOR",
            DataType::Geo => "GEO",
            DataType::Date => "DATE",
            DataType::DateTime => "DATETIME",
            DataType::DateDelta => "DATEDELTA",
            DataType::DateTimeDelta => "DATETIMEDELTA",
            DataType::MonthDelta => "MONTHDELTA",
            DataType::NullList => "NULLLIST",
            DataType::IntList => "INTLIST",
            DataType::NumberList => "NUMBERLIST",
            DataType::StrList => "STRLIST",
            DataType::ClobList => "CLOBLIST",
            DataType::DateList => "DATELIST",
            DataType::DateTimeList => "DATETIMELIST",
            DataType::NullSet => "NULLSET",
            DataType::IntSet => "INTSET",
            DataType::NumberSet => "NUMBERSET",
            DataType::StrSet => "STRSET",
            DataType::DateSet => "DATESET",
            DataType::DateTimeSet => "DATETIMESET",
        }
    }

    /// Lower case name (`"datetimedelta"`).
    pub fn value(&self) -> String {
        self.name().to_ascii_lowercase()
    }

    /// Parse an upper case name (`"DATETIME"`); lower case is accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|dt| dt.name() == upper)
    }

    /// The aggregations a select expression of this type supports
    /// (`count` is always possible and not listed).
    pub fn aggregates(&self) -> &'static [Aggregate] {
        match self {
            DataType::Bool
            | DataType::Int
            | DataType::Number
            | DataType::DateDelta
            | DataType::DateTimeDelta
            | DataType::MonthDelta => GROUP_MIN_MAX_SUM,
            DataType::Str | DataType::Date | DataType::DateTime => GROUP_MIN_MAX,
            DataType::Color => &[Aggregate::Group],
            _ => &[],
        }
    }

    pub fn supports(&self, aggregate: Aggregate) -> bool {
        aggregate == Aggregate::Count || self.aggregates().contains(&aggregate)
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            DataType::NullList
                | DataType::IntList
                | DataType::NumberList
                | DataType::StrList
                | DataType::ClobList
                | DataType::DateList
                | DataType::DateTimeList
        )
    }

    pub fn is_set(&self) -> bool {
        matches!(
            self,
            DataType::NullSet
                | DataType::IntSet
                | DataType::NumberSet
                | DataType::StrSet
                | DataType::DateSet
                | DataType::DateTimeSet
        )
    }

    /// Check whether a value of type `given` may be used where `required`
    /// is expected.
    ///
    /// Returns the matching `DATATYPE_*` error kind when it may not. A
    /// missing requirement accepts everything. The relation only widens
    /// (`INT` is usable as `NUMBER`, never the reverse).
    pub fn compatible_to(given: DataType, required: Option<DataType>) -> Result<(), ErrorKind> {
        use DataType::*;

        let Some(required) = required else {
            return Ok(());
        };
        let ok = match (given, required) {
            (Null, _) => true,
            (g, r) if g == r => true,
            (Str | Clob, Str | Clob) => true,
            (Bool | Int, Number) => true,
            (Bool, Int) => true,
            (IntList, NumberList) => true,
            (DateList, DateTimeList) => true,
            (IntSet, NumberSet) => true,
            (DateSet, DateTimeSet) => true,
            (NullList, r) if r.is_list() => true,
            (NullSet, r) if r.is_set() => true,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(ErrorKind::Datatype(required))
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// Color
// ============================================================================

/// An RGBA color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color as a single integer, the way the database stores it.
    pub fn packed(&self) -> u32 {
        (u32::from(self.r) << 24) + (u32::from(self.g) << 16) + (u32::from(self.b) << 8) + u32::from(self.a)
    }

    /// `rrggbbaa`
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{}", self.hex())
        }
    }
}

// ============================================================================
// NodeType
// ============================================================================

/// One tag per AST node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Field,
    ConstNone,
    ConstBool,
    ConstInt,
    ConstNumber,
    ConstStr,
    ConstClob,
    ConstDate,
    ConstDateTime,
    ConstTimestamp,
    ConstColor,
    List,
    Set,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpLe,
    CmpGt,
    CmpGe,
    Add,
    Mul,
    Sub,
    FloorDiv,
    TrueDiv,
    Mod,
    And,
    Or,
    Contains,
    NotContains,
    Is,
    IsNot,
    Item,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    Slice,
    Not,
    Neg,
    BitNot,
    If,
    Attr,
    Func,
    Meth,
}

impl NodeType {
    pub const ALL: [NodeType; 45] = [
        NodeType::Field,
        NodeType::ConstNone,
        NodeType::ConstBool,
        NodeType::ConstInt,
        NodeType::ConstNumber,
        NodeType::ConstStr,
        NodeType::ConstClob,
        NodeType::ConstDate,
        NodeType::ConstDateTime,
        NodeType::ConstTimestamp,
        NodeType::ConstColor,
        NodeType::List,
        NodeType::Set,
        NodeType::CmpEq,
        NodeType::CmpNe,
        NodeType::CmpLt,
        NodeType::CmpLe,
        NodeType::CmpGt,
        NodeType::CmpGe,
        NodeType::Add,
        NodeType::Mul,
        NodeType::Sub,
        NodeType::FloorDiv,
        NodeType::TrueDiv,
        NodeType::Mod,
        NodeType::And,
        NodeType::Or,
        NodeType::Contains,
        NodeType::NotContains,
        NodeType::Is,
        NodeType::IsNot,
        NodeType::Item,
        NodeType::ShiftLeft,
        NodeType::ShiftRight,
        NodeType::BitAnd,
        NodeType::BitOr,
        NodeType::BitXor,
        NodeType::Slice,
        NodeType::Not,
        NodeType::Neg,
        NodeType::BitNot,
        NodeType::If,
        NodeType::Attr,
        NodeType::Func,
        NodeType::Meth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Field => "FIELD",
            NodeType::ConstNone => "CONST_NONE",
            NodeType::ConstBool => "CONST_BOOL",
            NodeType::ConstInt => "CONST_INT",
            NodeType::ConstNumber => "CONST_NUMBER",
            NodeType::ConstStr => "CONST_STR",
            NodeType::ConstClob => "CONST_CLOB",
            NodeType::ConstDate => "CONST_DATE",
            NodeType::ConstDateTime => "CONST_DATETIME",
            NodeType::ConstTimestamp => "CONST_TIMESTAMP",
            NodeType::ConstColor => "CONST_COLOR",
            NodeType::List => "LIST",
            NodeType::Set => "SET",
            NodeType::CmpEq => "CMP_EQ",
            NodeType::CmpNe => "CMP_NE",
            NodeType::CmpLt => "CMP_LT",
            NodeType::CmpLe => "CMP_LE",
            NodeType::CmpGt => "CMP_GT",
            NodeType::CmpGe => "CMP_GE",
            NodeType::Add => "BINOP_ADD",
            NodeType::Mul => "BINOP_MUL",
            NodeType::Sub => "BINOP_SUB",
            NodeType::FloorDiv => "BINOP_FLOORDIV",
            NodeType::TrueDiv => "BINOP_TRUEDIV",
            NodeType::Mod => "BINOP_MOD",
            NodeType::And => "BINOP_AND",
            NodeType::Or => "BINOP_OR",
            NodeType::Contains => "BINOP_CONTAINS",
            NodeType::NotContains => "BINOP_NOTCONTAINS",
            NodeType::Is => "BINOP_IS",
            NodeType::IsNot => "BINOP_ISNOT",
            NodeType::Item => "BINOP_ITEM",
            NodeType::ShiftLeft => "BINOP_SHIFTLEFT",
            NodeType::ShiftRight => "BINOP_SHIFTRIGHT",
            NodeType::BitAnd => "BINOP_BITAND",
            NodeType::BitOr => "BINOP_BITOR",
            NodeType::BitXor => "BINOP_BITXOR",
            NodeType::Slice => "TERNOP_SLICE",
            NodeType::Not => "UNOP_NOT",
            NodeType::Neg => "UNOP_NEG",
            NodeType::BitNot => "UNOP_BITNOT",
            NodeType::If => "TERNOP_IF",
            NodeType::Attr => "ATTR",
            NodeType::Func => "FUNC",
            NodeType::Meth => "METH",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|nt| nt.name() == upper)
    }

    /// Human readable title of the node shape.
    pub fn title(&self) -> &'static str {
        match self {
            NodeType::Field => "Field reference",
            NodeType::ConstNone => "Constant `None`",
            NodeType::ConstBool => "Boolean constant",
            NodeType::ConstInt => "Integer constant",
            NodeType::ConstNumber => "Number constant",
            NodeType::ConstStr => "String constant",
            NodeType::ConstClob => "CLOB constant",
            NodeType::ConstDate => "Date constant",
            NodeType::ConstDateTime | NodeType::ConstTimestamp => "Datetime constant",
            NodeType::ConstColor => "Color constant",
            NodeType::List => "List",
            NodeType::Set => "Set",
            NodeType::CmpEq => "Equality comparison (`A == B`)",
            NodeType::CmpNe => "Inequality comparison (`A != B`)",
            NodeType::CmpLt => "Less-than comparison (`A < B`)",
            NodeType::CmpLe => "Less-than or equal comparison (`A <= B`)",
            NodeType::CmpGt => "Greater-than comparison (`A > B`)",
            NodeType::CmpGe => "Greater-than or equal comparison (`A >= B`)",
            NodeType::Add => "Addition (`A + B`)",
            NodeType::Mul => "Multiplication (`A * B`)",
            NodeType::Sub => "Subtraction (`A - B`)",
            NodeType::FloorDiv => "Floor division (`A // B`)",
            NodeType::TrueDiv => "True division (`A / B`)",
            NodeType::Mod => "Modulo operation (`A % B`)",
            NodeType::And => "Logical \"and\" operation (`A and B`)",
            NodeType::Or => "Logical \"or\" operation (`A or B`)",
            NodeType::Contains => "Containment test (`A in B`)",
            NodeType::NotContains => "Inverted containment test (`A not in B`)",
            NodeType::Is => "Identity test (`A is B`)",
            NodeType::IsNot => "Inverted identity test (`A is not B`)",
            NodeType::Item => "Item access operation (`A[B]`)",
            NodeType::ShiftLeft => "Left shift operation (`A << B`)",
            NodeType::ShiftRight => "Right shift operation (`A >> B`)",
            NodeType::BitAnd => "Bitwise \"and\" operation (`A & B`)",
            NodeType::BitOr => "Bitwise \"or\" operation (`A | B`)",
            NodeType::BitXor => "Bitwise \"exclusive or\" operation (`A ^ B`)",
            NodeType::Slice => "Slice operation (`A[B:C]`)",
            NodeType::Not => "Logical negation operation (`not A`)",
            NodeType::Neg => "Arithmetic negation operation (`-A`)",
            NodeType::BitNot => "Bitwise \"not\" operation (`~A`)",
            NodeType::If => "if/else operation (`A if COND else B`)",
            NodeType::Attr => "Attribute access operation (`A.name`)",
            NodeType::Func => "Function call (`name(A, ...)`)",
            NodeType::Meth => "Method call (`A.name(B, ...)`)",
        }
    }

    /// Operator keywords that a rule spec writes as `?`, in order.
    pub(crate) fn spec_keywords(&self) -> &'static [&'static str] {
        match self {
            NodeType::And => &["and"],
            NodeType::Or => &["or"],
            NodeType::Contains => &["in"],
            NodeType::NotContains => &["not in"],
            NodeType::Is => &["is"],
            NodeType::IsNot => &["is not"],
            NodeType::Not => &["not"],
            NodeType::If => &["if", "else"],
            _ => &[],
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for NodeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
