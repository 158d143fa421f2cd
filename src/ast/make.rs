//! Constructors that build nodes from child nodes.
//!
//! The source text of a constructed node is generated: constants are written
//! in their canonical vSQL form and operands are parenthesized whenever their
//! precedence requires it, so the source parses back to the same tree.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use super::{Ast, AstKind, BinaryOp, Fragment, UnaryOp};
use crate::schema::Field;
use crate::types::Color;

/// Collects the source fragments of a node under construction.
#[derive(Default)]
struct Content {
    fragments: Vec<Fragment>,
    slots: usize,
}

impl Content {
    fn text(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(Fragment::Text(text.into()));
        self
    }

    fn slot(self) -> Self {
        self.wrapped(false)
    }

    fn wrapped(mut self, parenthesize: bool) -> Self {
        if parenthesize {
            self.fragments.push(Fragment::Text("(".into()));
        }
        self.fragments.push(Fragment::Slot(self.slots));
        self.slots += 1;
        if parenthesize {
            self.fragments.push(Fragment::Text(")".into()));
        }
        self
    }

    /// `open a, b, c close`
    fn items(mut self, open: &str, count: usize, close: &str) -> Self {
        self = self.text(open);
        for i in 0..count {
            if i > 0 {
                self = self.text(", ");
            }
            self = self.slot();
        }
        self.text(close)
    }

    fn build(self, kind: AstKind) -> Ast {
        Ast::from_content(kind, self.fragments)
    }
}

fn constant(kind: AstKind, source: String) -> Ast {
    Content::default().text(source).build(kind)
}

/// Python style `repr()` of a float, e.g. `42.5` or `100.0`.
pub(crate) fn number_repr(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

/// Quoted string literal that the lexer reads back as `value`.
pub(crate) fn str_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl Ast {
    // ========================================================================
    // Constants
    // ========================================================================

    pub fn make_none() -> Ast {
        constant(AstKind::Null, "None".into())
    }

    pub fn make_bool(value: bool) -> Ast {
        let source = if value { "True" } else { "False" };
        constant(AstKind::Bool(value), source.into())
    }

    pub fn make_int(value: i64) -> Ast {
        constant(AstKind::Int(value), value.to_string())
    }

    pub fn make_number(value: f64) -> Ast {
        constant(AstKind::Number(value), number_repr(value))
    }

    pub fn make_str(value: impl Into<String>) -> Ast {
        let value = value.into();
        let source = str_repr(&value);
        constant(AstKind::Str(value), source)
    }

    pub fn make_clob(value: impl Into<String>) -> Ast {
        let value = value.into();
        let source = str_repr(&value);
        constant(AstKind::Clob(value), source)
    }

    pub fn make_color(value: Color) -> Ast {
        constant(AstKind::Color(value), value.to_string())
    }

    pub fn make_date(value: NaiveDate) -> Ast {
        constant(AstKind::Date(value), format!("@({})", value.format("%Y-%m-%d")))
    }

    /// Sub-second precision is dropped.
    pub fn make_datetime(value: NaiveDateTime) -> Ast {
        let value = value.with_nanosecond(0).unwrap_or(value);
        constant(
            AstKind::DateTime(value),
            format!("@({})", value.format("%Y-%m-%dT%H:%M:%S")),
        )
    }

    // ========================================================================
    // Collections
    // ========================================================================

    pub fn make_list(items: Vec<Ast>) -> Ast {
        let content = if items.is_empty() {
            Content::default().text("[]")
        } else {
            Content::default().items("[", items.len(), "]")
        };
        content.build(AstKind::List(items))
    }

    /// An empty set is written `{/}`, since `{}` would be a dict.
    pub fn make_set(items: Vec<Ast>) -> Ast {
        let content = if items.is_empty() {
            Content::default().text("{/}")
        } else {
            Content::default().items("{", items.len(), "}")
        };
        content.build(AstKind::Set(items))
    }

    // ========================================================================
    // Field references
    // ========================================================================

    /// Reference to a root variable.
    pub fn make_root(field: Arc<Field>) -> Ast {
        let identifier = field.identifier.clone();
        Content::default().text(identifier.clone()).build(AstKind::FieldRef {
            parent: None,
            identifier,
            field: Some(field),
        })
    }

    /// Reference to an unknown root variable.
    pub fn make_unknown_root(identifier: impl Into<String>) -> Ast {
        let identifier = identifier.into();
        Content::default().text(identifier.clone()).build(AstKind::FieldRef {
            parent: None,
            identifier,
            field: None,
        })
    }

    /// `parent.identifier`, resolved in the group `parent` refers to.
    pub fn make_fieldref(parent: Arc<Ast>, identifier: impl Into<String>) -> Ast {
        let identifier = identifier.into();
        let field = resolve_field(&parent, &identifier);
        Content::default()
            .slot()
            .text(".")
            .text(identifier.clone())
            .build(AstKind::FieldRef {
                parent: Some(parent),
                identifier,
                field,
            })
    }

    // ========================================================================
    // Operators
    // ========================================================================

    pub fn make_binary(op: BinaryOp, obj1: Ast, obj2: Ast) -> Ast {
        let precedence = op.precedence();
        let content = Content::default().wrapped(obj1.precedence() < precedence);
        let content = match op {
            BinaryOp::Item => content.text("[").slot().text("]"),
            _ => content
                .text(format!(" {} ", op.operator()))
                .wrapped(obj2.precedence() <= precedence),
        };
        content.build(AstKind::Binary {
            op,
            obj1: Box::new(obj1),
            obj2: Box::new(obj2),
        })
    }

    pub fn make_unary(op: UnaryOp, obj: Ast) -> Ast {
        Content::default()
            .text(op.operator())
            .wrapped(obj.precedence() <= op.precedence())
            .build(AstKind::Unary {
                op,
                obj: Box::new(obj),
            })
    }

    pub fn make_if(objif: Ast, objcond: Ast, objelse: Ast) -> Ast {
        const PRECEDENCE: u8 = 3;
        Content::default()
            .wrapped(objif.precedence() <= PRECEDENCE)
            .text(" if ")
            .wrapped(objcond.precedence() <= PRECEDENCE)
            .text(" else ")
            .wrapped(objelse.precedence() <= PRECEDENCE)
            .build(AstKind::If {
                objif: Box::new(objif),
                objcond: Box::new(objcond),
                objelse: Box::new(objelse),
            })
    }

    /// `obj[index1:index2]` with optional bounds.
    pub fn make_slice(obj: Ast, index1: Option<Ast>, index2: Option<Ast>) -> Ast {
        let index1 = index1.unwrap_or_else(empty_none);
        let index2 = index2.unwrap_or_else(empty_none);
        Content::default()
            .wrapped(obj.precedence() < 16)
            .text("[")
            .slot()
            .text(":")
            .slot()
            .text("]")
            .build(AstKind::Slice {
                obj: Box::new(obj),
                index1: Box::new(index1),
                index2: Box::new(index2),
            })
    }

    pub fn make_attr(obj: Ast, attrname: impl Into<String>) -> Ast {
        let attrname = attrname.into();
        Content::default()
            .wrapped(obj.precedence() < 19)
            .text(".")
            .text(attrname.clone())
            .build(AstKind::Attr {
                obj: Box::new(obj),
                attrname,
            })
    }

    pub fn make_func(name: impl Into<String>, args: Vec<Ast>) -> Ast {
        let name = name.into();
        Content::default()
            .text(name.clone())
            .items("(", args.len(), ")")
            .build(AstKind::Func { name, args })
    }

    pub fn make_meth(obj: Ast, name: impl Into<String>, args: Vec<Ast>) -> Ast {
        let name = name.into();
        Content::default()
            .wrapped(obj.precedence() < 17)
            .text(".")
            .text(name.clone())
            .items("(", args.len(), ")")
            .build(AstKind::Meth {
                obj: Box::new(obj),
                name,
                args,
            })
    }
}

/// The `None` standing in for a missing slice bound.
pub(crate) fn empty_none() -> Ast {
    Ast::from_content(AstKind::Null, Vec::new())
}

/// Look `identifier` up in the group the parent's field refers to.
pub(crate) fn resolve_field(parent: &Ast, identifier: &str) -> Option<Arc<Field>> {
    match &parent.kind {
        AstKind::FieldRef {
            field: Some(field), ..
        } => field.refgroup()?.get(identifier),
        _ => None,
    }
}
