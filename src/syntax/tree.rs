//! The parsed expression tree.
//!
//! This is the plain shape the parser produces: every node knows its byte
//! span in the source, nothing is typed or resolved yet. Ingestion turns it
//! into an [`Ast`](crate::ast::Ast).

use chrono::{NaiveDate, NaiveDateTime};

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::ErrorKind;
use crate::types::Color;

/// Byte range in the source text.
pub type Span = std::ops::Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Color(Color),
    /// A literal that lexed but doesn't denote a value, e.g. `@(2000-13-01)`.
    Malformed(ErrorKind),
}

/// An argument of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Expr),
    Keyword(String, Expr),
    /// `*args`
    Star(Expr),
    /// `**kwargs`
    StarStar(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Const(Literal),
    Name(String),
    List(Vec<Expr>),
    Set(Vec<Expr>),
    Attr {
        obj: Box<Expr>,
        name: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Arg>,
    },
    /// `obj[index]`
    Item {
        obj: Box<Expr>,
        index: Box<Expr>,
    },
    /// `obj[index1:index2]`
    Slice {
        obj: Box<Expr>,
        index1: Option<Box<Expr>>,
        index2: Option<Box<Expr>>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        obj: Box<Expr>,
    },
    /// `objif if objcond else objelse`
    If {
        objif: Box<Expr>,
        objcond: Box<Expr>,
        objelse: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// The node itself, without enclosing parentheses.
    pub span: Span,
    /// Including enclosing parentheses; this is what the parent covers.
    pub outer_span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            outer_span: span.clone(),
            span,
        }
    }

    pub(crate) fn parenthesized(mut self, outer_span: Span) -> Self {
        self.outer_span = outer_span;
        self
    }
}
