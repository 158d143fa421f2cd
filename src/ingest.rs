//! Turning a parsed expression tree into an [`Ast`].
//!
//! Names are resolved against the root variables, and attribute access on a
//! field reference is resolved in the group that field refers to. Every node
//! keeps the exact source text it was parsed from: the text between the
//! spans of its operands becomes the node's literal content.
//!
//! Unknown names, functions or attributes don't fail here; they produce
//! nodes carrying an error. Only constructs vSQL can't express at all
//! (keyword arguments, calling something that isn't a name) are rejected.

use std::sync::Arc;

use thiserror::Error;

use crate::ast::{empty_none, resolve_field, Ast, AstKind, BinaryOp, Fragment};
use crate::schema::Vars;
use crate::syntax::{Arg, Expr, ExprKind, Literal, Span};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("Keyword arguments are not supported in vSQL: `{0}`")]
    KeywordArgument(String),

    #[error("Star arguments are not supported in vSQL: `{0}`")]
    StarArgument(String),

    #[error("Only functions and methods can be called in vSQL: `{0}`")]
    Callee(String),
}

/// Lays out a node's source: the node's text with the operands cut out.
struct Layout<'a> {
    source: &'a str,
    cursor: usize,
    end: usize,
    fragments: Vec<Fragment>,
    slots: usize,
}

impl<'a> Layout<'a> {
    fn new(source: &'a str, span: &Span) -> Self {
        Self {
            source,
            cursor: span.start,
            end: span.end,
            fragments: Vec::new(),
            slots: 0,
        }
    }

    fn text(&self, range: std::ops::Range<usize>) -> Fragment {
        Fragment::Text(self.source.get(range).unwrap_or_default().to_string())
    }

    /// Next operand; `None` for an operand without source (a missing slice
    /// index), which takes up no text.
    fn slot(mut self, span: Option<&Span>) -> Self {
        if let Some(span) = span {
            self.fragments.push(self.text(self.cursor..span.start));
            self.cursor = span.end;
        }
        self.fragments.push(Fragment::Slot(self.slots));
        self.slots += 1;
        self
    }

    fn build(mut self, kind: AstKind) -> Ast {
        self.fragments.push(self.text(self.cursor..self.end));
        Ast::from_content(kind, self.fragments)
    }
}

/// Convert `expr`, parsed from `source`, with `vars` as the root variables.
pub fn ingest(expr: &Expr, source: &str, vars: &Vars) -> Result<Ast, IngestError> {
    Ingester { source, vars }.ingest(expr)
}

struct Ingester<'a> {
    source: &'a str,
    vars: &'a Vars,
}

impl Ingester<'_> {
    fn layout(&self, expr: &Expr) -> Layout<'_> {
        Layout::new(self.source, &expr.span)
    }

    fn text_of(&self, expr: &Expr) -> String {
        self.source
            .get(expr.span.clone())
            .unwrap_or_default()
            .to_string()
    }

    fn ingest(&self, expr: &Expr) -> Result<Ast, IngestError> {
        let ast = match &expr.kind {
            ExprKind::Const(literal) => self.constant(expr, literal),
            ExprKind::Name(name) => self.layout(expr).build(AstKind::FieldRef {
                parent: None,
                identifier: name.clone(),
                field: self.vars.get(name).cloned(),
            }),
            ExprKind::List(items) | ExprKind::Set(items) => {
                let mut layout = self.layout(expr);
                let mut asts = Vec::with_capacity(items.len());
                for item in items {
                    layout = layout.slot(Some(&item.span));
                    asts.push(self.ingest(item)?);
                }
                let kind = match &expr.kind {
                    ExprKind::Set(_) => AstKind::Set(asts),
                    _ => AstKind::List(asts),
                };
                layout.build(kind)
            }
            ExprKind::Attr { obj, name } => {
                let parent = self.ingest(obj)?;
                let layout = self.layout(expr).slot(Some(&obj.span));
                match resolve_field(&parent, name) {
                    Some(field) => layout.build(AstKind::FieldRef {
                        parent: Some(Arc::new(parent)),
                        identifier: name.clone(),
                        field: Some(field),
                    }),
                    None => layout.build(AstKind::Attr {
                        obj: Box::new(parent),
                        attrname: name.clone(),
                    }),
                }
            }
            ExprKind::Call { callee, args } => self.call(expr, callee, args)?,
            ExprKind::Item { obj, index } => {
                let layout = self
                    .layout(expr)
                    .slot(Some(&obj.span))
                    .slot(Some(&index.span));
                layout.build(AstKind::Binary {
                    op: BinaryOp::Item,
                    obj1: Box::new(self.ingest(obj)?),
                    obj2: Box::new(self.ingest(index)?),
                })
            }
            ExprKind::Slice {
                obj,
                index1,
                index2,
            } => {
                let layout = self
                    .layout(expr)
                    .slot(Some(&obj.span))
                    .slot(index1.as_ref().map(|i| &i.span))
                    .slot(index2.as_ref().map(|i| &i.span));
                layout.build(AstKind::Slice {
                    obj: Box::new(self.ingest(obj)?),
                    index1: Box::new(self.optional(index1.as_deref())?),
                    index2: Box::new(self.optional(index2.as_deref())?),
                })
            }
            ExprKind::Binary { op, left, right } => {
                let layout = self
                    .layout(expr)
                    .slot(Some(&left.span))
                    .slot(Some(&right.span));
                layout.build(AstKind::Binary {
                    op: *op,
                    obj1: Box::new(self.ingest(left)?),
                    obj2: Box::new(self.ingest(right)?),
                })
            }
            ExprKind::Unary { op, obj } => {
                let layout = self.layout(expr).slot(Some(&obj.span));
                layout.build(AstKind::Unary {
                    op: *op,
                    obj: Box::new(self.ingest(obj)?),
                })
            }
            ExprKind::If {
                objif,
                objcond,
                objelse,
            } => {
                let layout = self
                    .layout(expr)
                    .slot(Some(&objif.span))
                    .slot(Some(&objcond.span))
                    .slot(Some(&objelse.span));
                layout.build(AstKind::If {
                    objif: Box::new(self.ingest(objif)?),
                    objcond: Box::new(self.ingest(objcond)?),
                    objelse: Box::new(self.ingest(objelse)?),
                })
            }
        };
        Ok(ast)
    }

    fn optional(&self, expr: Option<&Expr>) -> Result<Ast, IngestError> {
        match expr {
            Some(expr) => self.ingest(expr),
            None => Ok(empty_none()),
        }
    }

    fn constant(&self, expr: &Expr, literal: &Literal) -> Ast {
        let layout = self.layout(expr);
        match literal {
            Literal::None => layout.build(AstKind::Null),
            Literal::Bool(value) => layout.build(AstKind::Bool(*value)),
            Literal::Int(value) => layout.build(AstKind::Int(*value)),
            Literal::Float(value) => layout.build(AstKind::Number(*value)),
            Literal::Str(value) => layout.build(AstKind::Str(value.clone())),
            Literal::Date(value) => layout.build(AstKind::Date(*value)),
            Literal::DateTime(value) => {
                use chrono::Timelike;
                let value = value.with_nanosecond(0).unwrap_or(*value);
                layout.build(AstKind::DateTime(value))
            }
            Literal::Color(value) => layout.build(AstKind::Color(*value)),
            Literal::Malformed(error) => layout.build(AstKind::Null).with_error(*error),
        }
    }

    fn call(&self, expr: &Expr, callee: &Expr, args: &[Arg]) -> Result<Ast, IngestError> {
        let mut positional = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Arg::Positional(arg) => positional.push(arg),
                Arg::Keyword(..) => return Err(IngestError::KeywordArgument(self.text_of(expr))),
                Arg::Star(_) | Arg::StarStar(_) => {
                    return Err(IngestError::StarArgument(self.text_of(expr)))
                }
            }
        }

        match &callee.kind {
            ExprKind::Name(name) => {
                let mut layout = self.layout(expr);
                let mut asts = Vec::with_capacity(positional.len());
                for arg in positional {
                    layout = layout.slot(Some(&arg.span));
                    asts.push(self.ingest(arg)?);
                }
                Ok(layout.build(AstKind::Func {
                    name: name.clone(),
                    args: asts,
                }))
            }
            ExprKind::Attr { obj, name } => {
                let mut layout = self.layout(expr).slot(Some(&obj.span));
                let receiver = self.ingest(obj)?;
                let mut asts = Vec::with_capacity(positional.len());
                for arg in positional {
                    layout = layout.slot(Some(&arg.span));
                    asts.push(self.ingest(arg)?);
                }
                Ok(layout.build(AstKind::Meth {
                    obj: Box::new(receiver),
                    name: name.clone(),
                    args: asts,
                }))
            }
            _ => Err(IngestError::Callee(self.text_of(expr))),
        }
    }
}
