//! The vSQL abstract syntax tree.
//!
//! An [`Ast`] node is a tagged [`AstKind`] plus the source text it was
//! created from. The text is kept as a list of [`Fragment`]s: literal text
//! interleaved with references to child nodes, so [`Ast::source`] reproduces
//! the original expression byte for byte even for invalid trees.
//!
//! Nodes validate themselves on construction. A node's `datatype` is `None`
//! exactly when its `error` is set; [`Ast::check_valid`] turns the error into
//! a [`VsqlError`](crate::error::VsqlError) pointing at its original cause.

mod make;
mod sql;
mod validate;

pub(crate) use make::{empty_none, resolve_field};

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ErrorKind;
use crate::schema::Field;
use crate::types::{Color, DataType, NodeType};

// ============================================================================
// Operators
// ============================================================================

/// Operators with two operands (including item access `A[B]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Contains,
    NotContains,
    Is,
    IsNot,
    Item,
}

impl BinaryOp {
    pub fn nodetype(&self) -> NodeType {
        match self {
            BinaryOp::Eq => NodeType::CmpEq,
            BinaryOp::Ne => NodeType::CmpNe,
            BinaryOp::Lt => NodeType::CmpLt,
            BinaryOp::Le => NodeType::CmpLe,
            BinaryOp::Gt => NodeType::CmpGt,
            BinaryOp::Ge => NodeType::CmpGe,
            BinaryOp::Add => NodeType::Add,
            BinaryOp::Sub => NodeType::Sub,
            BinaryOp::Mul => NodeType::Mul,
            BinaryOp::TrueDiv => NodeType::TrueDiv,
            BinaryOp::FloorDiv => NodeType::FloorDiv,
            BinaryOp::Mod => NodeType::Mod,
            BinaryOp::ShiftLeft => NodeType::ShiftLeft,
            BinaryOp::ShiftRight => NodeType::ShiftRight,
            BinaryOp::BitAnd => NodeType::BitAnd,
            BinaryOp::BitOr => NodeType::BitOr,
            BinaryOp::BitXor => NodeType::BitXor,
            BinaryOp::And => NodeType::And,
            BinaryOp::Or => NodeType::Or,
            BinaryOp::Contains => NodeType::Contains,
            BinaryOp::NotContains => NodeType::NotContains,
            BinaryOp::Is => NodeType::Is,
            BinaryOp::IsNot => NodeType::IsNot,
            BinaryOp::Item => NodeType::Item,
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Item => 16,
            BinaryOp::Mul | BinaryOp::TrueDiv | BinaryOp::FloorDiv | BinaryOp::Mod => 12,
            BinaryOp::Add | BinaryOp::Sub => 11,
            BinaryOp::ShiftLeft | BinaryOp::ShiftRight => 10,
            BinaryOp::BitAnd => 9,
            BinaryOp::BitXor => 8,
            BinaryOp::BitOr => 7,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge
            | BinaryOp::Contains
            | BinaryOp::NotContains
            | BinaryOp::Is
            | BinaryOp::IsNot => 6,
            BinaryOp::And | BinaryOp::Or => 4,
        }
    }

    /// Operator as written in vSQL source (`Item` has none).
    pub fn operator(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::TrueDiv => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Contains => "in",
            BinaryOp::NotContains => "not in",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
            BinaryOp::Item => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    BitNot,
}

impl UnaryOp {
    pub fn nodetype(&self) -> NodeType {
        match self {
            UnaryOp::Not => NodeType::Not,
            UnaryOp::Neg => NodeType::Neg,
            UnaryOp::BitNot => NodeType::BitNot,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            UnaryOp::Not => 5,
            UnaryOp::Neg | UnaryOp::BitNot => 14,
        }
    }

    /// Prefix including any separating space.
    pub fn operator(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not ",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// A piece of a node's source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    /// The source of the node's n-th source slot: the parent for field
    /// references, the n-th child for everything else.
    Slot(usize),
}

/// The shape of a node, one variant per [`NodeType`].
#[derive(Debug, Clone)]
pub enum AstKind {
    /// Reference to a schema field. `field` is `None` for unknown fields.
    ///
    /// The parent is shared: several references (`p.firstname`,
    /// `p.lastname`) may hang off the same `p`.
    FieldRef {
        parent: Option<Arc<Ast>>,
        identifier: String,
        field: Option<Arc<Field>>,
    },
    /// The constant `None`.
    Null,
    Bool(bool),
    Int(i64),
    Number(f64),
    Str(String),
    Clob(String),
    Color(Color),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<Ast>),
    Set(Vec<Ast>),
    Binary {
        op: BinaryOp,
        obj1: Box<Ast>,
        obj2: Box<Ast>,
    },
    Unary {
        op: UnaryOp,
        obj: Box<Ast>,
    },
    /// `objif if objcond else objelse`
    If {
        objif: Box<Ast>,
        objcond: Box<Ast>,
        objelse: Box<Ast>,
    },
    /// `obj[index1:index2]`; a missing index is a `None` constant with
    /// empty source.
    Slice {
        obj: Box<Ast>,
        index1: Box<Ast>,
        index2: Box<Ast>,
    },
    Attr {
        obj: Box<Ast>,
        attrname: String,
    },
    Func {
        name: String,
        args: Vec<Ast>,
    },
    Meth {
        obj: Box<Ast>,
        name: String,
        args: Vec<Ast>,
    },
}

/// A vSQL expression node.
#[derive(Debug, Clone)]
pub struct Ast {
    pub kind: AstKind,
    /// Result type, `None` if the node is invalid.
    pub datatype: Option<DataType>,
    pub error: Option<ErrorKind>,
    content: Vec<Fragment>,
}

impl Ast {
    /// Create a node from its kind and source fragments and validate it.
    ///
    /// `Slot` fragments must reference the node's slots in order. Empty text
    /// is dropped and adjacent text is merged.
    pub fn from_content(kind: AstKind, content: Vec<Fragment>) -> Self {
        let mut merged: Vec<Fragment> = Vec::with_capacity(content.len());
        for fragment in content {
            match fragment {
                Fragment::Text(text) if text.is_empty() => {}
                Fragment::Text(text) => match merged.last_mut() {
                    Some(Fragment::Text(last)) => last.push_str(&text),
                    _ => merged.push(Fragment::Text(text)),
                },
                slot => merged.push(slot),
            }
        }
        let mut ast = Self {
            kind,
            datatype: None,
            error: None,
            content: merged,
        };
        ast.validate();
        ast
    }

    /// Mark a constant as malformed.
    pub fn with_error(mut self, error: ErrorKind) -> Self {
        self.error = Some(error);
        self.datatype = None;
        self
    }

    pub fn content(&self) -> &[Fragment] {
        &self.content
    }

    pub fn nodetype(&self) -> NodeType {
        match &self.kind {
            AstKind::FieldRef { .. } => NodeType::Field,
            AstKind::Null => NodeType::ConstNone,
            AstKind::Bool(_) => NodeType::ConstBool,
            AstKind::Int(_) => NodeType::ConstInt,
            AstKind::Number(_) => NodeType::ConstNumber,
            AstKind::Str(_) => NodeType::ConstStr,
            AstKind::Clob(_) => NodeType::ConstClob,
            AstKind::Color(_) => NodeType::ConstColor,
            AstKind::Date(_) => NodeType::ConstDate,
            AstKind::DateTime(_) => NodeType::ConstDateTime,
            AstKind::List(_) => NodeType::List,
            AstKind::Set(_) => NodeType::Set,
            AstKind::Binary { op, .. } => op.nodetype(),
            AstKind::Unary { op, .. } => op.nodetype(),
            AstKind::If { .. } => NodeType::If,
            AstKind::Slice { .. } => NodeType::Slice,
            AstKind::Attr { .. } => NodeType::Attr,
            AstKind::Func { .. } => NodeType::Func,
            AstKind::Meth { .. } => NodeType::Meth,
        }
    }

    /// Binding strength used to decide where `make_*` needs parentheses.
    pub fn precedence(&self) -> u8 {
        match &self.kind {
            AstKind::Null
            | AstKind::Bool(_)
            | AstKind::Int(_)
            | AstKind::Number(_)
            | AstKind::Str(_)
            | AstKind::Clob(_)
            | AstKind::Color(_)
            | AstKind::Date(_)
            | AstKind::DateTime(_)
            | AstKind::List(_)
            | AstKind::Set(_) => 20,
            AstKind::FieldRef { .. } | AstKind::Attr { .. } => 19,
            AstKind::Func { .. } => 18,
            AstKind::Meth { .. } => 17,
            AstKind::Slice { .. } => 16,
            AstKind::Binary { op, .. } => op.precedence(),
            AstKind::Unary { op, .. } => op.precedence(),
            AstKind::If { .. } => 3,
        }
    }

    /// Immediate child nodes, in operand order.
    ///
    /// The parent of a field reference is not a child: it is part of the
    /// reference's identity, not an operand.
    pub fn children(&self) -> impl Iterator<Item = &Ast> {
        let children: Vec<&Ast> = match &self.kind {
            AstKind::List(items) | AstKind::Set(items) => items.iter().collect(),
            AstKind::Binary { obj1, obj2, .. } => vec![obj1.as_ref(), obj2.as_ref()],
            AstKind::Unary { obj, .. } | AstKind::Attr { obj, .. } => vec![obj.as_ref()],
            AstKind::If {
                objif,
                objcond,
                objelse,
            } => vec![objif.as_ref(), objcond.as_ref(), objelse.as_ref()],
            AstKind::Slice {
                obj,
                index1,
                index2,
            } => vec![obj.as_ref(), index1.as_ref(), index2.as_ref()],
            AstKind::Func { args, .. } => args.iter().collect(),
            AstKind::Meth { obj, args, .. } => {
                std::iter::once(obj.as_ref()).chain(args.iter()).collect()
            }
            _ => Vec::new(),
        };
        children.into_iter()
    }

    fn slots(&self) -> Vec<&Ast> {
        match &self.kind {
            AstKind::FieldRef { parent, .. } => parent.iter().map(Arc::as_ref).collect(),
            _ => self.children().collect(),
        }
    }

    /// All descendants in depth-first pre-order, `self` excluded.
    pub fn walknodes(&self) -> Vec<&Ast> {
        let mut nodes = Vec::new();
        for child in self.children() {
            nodes.push(child);
            nodes.extend(child.walknodes());
        }
        nodes
    }

    /// Every path from `self` to a node in the subtree (`self` included),
    /// in depth-first pre-order.
    pub fn walkpaths(&self) -> Vec<Vec<&Ast>> {
        fn walk<'a>(node: &'a Ast, path: &mut Vec<&'a Ast>, paths: &mut Vec<Vec<&'a Ast>>) {
            path.push(node);
            paths.push(path.clone());
            for child in node.children() {
                walk(child, path, paths);
            }
            path.pop();
        }
        let mut paths = Vec::new();
        walk(self, &mut Vec::new(), &mut paths);
        paths
    }

    /// The field reference nodes of the tree (only the outermost reference
    /// of a chain, parents are reached through it).
    pub fn fieldrefs(&self) -> Vec<&Ast> {
        match &self.kind {
            AstKind::FieldRef { .. } => vec![self],
            _ => self.children().flat_map(Ast::fieldrefs).collect(),
        }
    }

    /// Dot-joined identifier path of a field reference (`p.company.name`).
    pub fn full_identifier(&self) -> Option<String> {
        match &self.kind {
            AstKind::FieldRef {
                parent: Some(parent),
                identifier,
                ..
            } => Some(format!(
                "{}.{identifier}",
                parent.full_identifier().unwrap_or_default()
            )),
            AstKind::FieldRef { identifier, .. } => Some(identifier.clone()),
            _ => None,
        }
    }

    /// The value of the node that isn't represented by a child node:
    /// constant values, names, the item count of untyped collections.
    pub fn nodevalue(&self) -> Option<String> {
        if self.error.is_some_and(|e| e.is_malformed_constant()) {
            return Some(self.source());
        }
        match &self.kind {
            AstKind::FieldRef { .. } => self.full_identifier(),
            AstKind::Bool(value) => Some(if *value { "True" } else { "False" }.to_string()),
            AstKind::Int(value) => Some(value.to_string()),
            AstKind::Number(value) => Some(make::number_repr(*value)),
            AstKind::Str(value) | AstKind::Clob(value) => Some(value.clone()),
            AstKind::Color(color) => Some(color.hex()),
            AstKind::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            AstKind::DateTime(datetime) => Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            AstKind::List(items) if self.datatype == Some(DataType::NullList) => {
                Some(items.len().to_string())
            }
            AstKind::Set(items) if self.datatype == Some(DataType::NullSet) => {
                Some(items.len().to_string())
            }
            AstKind::Attr { attrname, .. } => Some(attrname.clone()),
            AstKind::Func { name, .. } | AstKind::Meth { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// The vSQL source text of the node.
    pub fn source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }

    fn write_source(&self, out: &mut String) {
        let slots = self.slots();
        for fragment in &self.content {
            match fragment {
                Fragment::Text(text) => out.push_str(text),
                Fragment::Slot(index) => {
                    if let Some(slot) = slots.get(*index) {
                        slot.write_source(out);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vsql.{}", self.nodetype())?;
        if let Some(datatype) = self.datatype {
            write!(f, "(datatype {datatype})")?;
        }
        if let Some(error) = self.error {
            write!(f, "(error {error})")?;
        }
        write!(f, ": {}", self.source())
    }
}
